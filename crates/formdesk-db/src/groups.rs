use crate::{models, schema, Error, Store};
use diesel::prelude::*;
use diesel_async::{scoped_futures::ScopedFutureExt, AsyncConnection, RunQueryDsl};
use itertools::Itertools;
use std::collections::HashMap;

impl Store {
    /// Moves the bindings of `field_ids` on form `form_id` into group `group_id`.
    ///
    /// All or nothing: when any requested field is not bound to the form the
    /// call fails with [`Error::Validation`] and no binding changes. A missing
    /// or tombstoned form, like a missing group, is [`Error::NotFound`]. The
    /// form row is share-locked and the matched bindings are locked
    /// (`FOR UPDATE`) inside the same transaction as the update. Returns the
    /// number of bindings moved.
    #[tracing::instrument(skip(self))]
    pub async fn assign_fields_to_group(
        &self,
        form_id: i32,
        group_id: i32,
        field_ids: &[i32],
    ) -> Result<usize, Error> {
        let requested = field_ids.iter().copied().unique().collect_vec();
        if requested.is_empty() {
            return Err(Error::Validation(
                "at least one field id is required".to_owned(),
            ));
        }
        let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
        self.connection()
            .await?
            .transaction(move |conn| {
                use schema::formdesk::{form_fields, forms, groups};
                async move {
                    forms::table
                        .filter(forms::id.eq(form_id).and(forms::deleted.is_null()))
                        .select(forms::id)
                        .for_share()
                        .first::<i32>(conn)
                        .await?;
                    groups::table
                        .find(group_id)
                        .select(groups::id)
                        .first::<i32>(conn)
                        .await?;
                    let bound = form_fields::table
                        .filter(
                            form_fields::form_id
                                .eq(form_id)
                                .and(form_fields::field_id.eq_any(requested.clone())),
                        )
                        .select(form_fields::field_id)
                        .for_update()
                        .load::<i32>(conn)
                        .await?;
                    let unbound = requested
                        .iter()
                        .filter(|id| !bound.contains(*id))
                        .sorted()
                        .collect_vec();
                    if !unbound.is_empty() {
                        return Err(Error::Validation(format!(
                            "fields {unbound:?} are not bound to form {form_id}"
                        )));
                    }
                    let moved = diesel::update(form_fields::table)
                        .filter(
                            form_fields::form_id
                                .eq(form_id)
                                .and(form_fields::field_id.eq_any(requested)),
                        )
                        .set((
                            form_fields::group_id.eq(group_id),
                            form_fields::updated.eq(now),
                        ))
                        .execute(conn)
                        .await?;
                    tracing::info!(moved, "fields assigned to group");
                    Ok::<_, Error>(moved)
                }
                .scope_boxed()
            })
            .await
    }

    /// Lists the bindings of form `form_id` tagged with group `group_id`,
    /// each flattened with its field definition and data type name.
    ///
    /// A tombstoned form has no group fields. Bindings whose field cannot be
    /// resolved (tombstoned field) are left out of the result rather than
    /// failing the read.
    #[tracing::instrument(skip(self))]
    pub async fn load_group_fields(
        &self,
        form_id: i32,
        group_id: i32,
    ) -> Result<Vec<models::GroupField>, Error> {
        use schema::formdesk::{data_types, fields, form_fields, forms};
        let mut conn = self.connection().await?;
        let bindings = form_fields::table
            .inner_join(forms::table)
            .filter(
                form_fields::form_id
                    .eq(form_id)
                    .and(form_fields::group_id.eq(group_id))
                    .and(forms::deleted.is_null()),
            )
            .order(form_fields::id)
            .select(models::FormField::as_select())
            .load(&mut conn)
            .await?;
        if bindings.is_empty() {
            return Ok(Vec::new());
        }
        let field_ids = bindings.iter().map(|b| b.field_id).unique().collect_vec();
        let definitions = fields::table
            .inner_join(data_types::table)
            .filter(fields::id.eq_any(field_ids).and(fields::deleted.is_null()))
            .select((
                models::Field::as_select(),
                models::DataType::as_select(),
            ))
            .load::<(models::Field, models::DataType)>(&mut conn)
            .await?
            .into_iter()
            .map(|(field, data_type)| (field.id, (field, data_type)))
            .collect::<HashMap<_, _>>();
        Ok(bindings
            .into_iter()
            .filter_map(|binding| match definitions.get(&binding.field_id) {
                Some((field, data_type)) => {
                    Some(models::GroupField::resolve(binding, field, data_type))
                }
                None => {
                    tracing::debug!(
                        binding_id = binding.id,
                        field_id = binding.field_id,
                        "skipping binding to unresolved field"
                    );
                    None
                }
            })
            .collect())
    }
}
