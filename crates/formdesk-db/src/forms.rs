use crate::{models, schema, Error, Store};
use diesel::prelude::*;
use diesel_async::{
    scoped_futures::ScopedFutureExt, AsyncConnection, AsyncPgConnection, RunQueryDsl,
};
use itertools::Itertools;

/// Fails with [`Error::Validation`] unless every form and field the bindings
/// point at exists and is not tombstoned. The matched rows stay share-locked
/// until the surrounding transaction ends.
async fn lock_binding_targets(
    conn: &mut AsyncPgConnection,
    bindings: &[models::NewFormField],
) -> Result<(), Error> {
    use schema::formdesk::{fields, forms};
    let form_ids = bindings.iter().map(|b| b.form_id).unique().collect_vec();
    let live_forms = forms::table
        .filter(forms::id.eq_any(form_ids.clone()).and(forms::deleted.is_null()))
        .select(forms::id)
        .for_share()
        .load::<i32>(conn)
        .await?;
    all_live("forms", &form_ids, &live_forms)?;
    let field_ids = bindings.iter().map(|b| b.field_id).unique().collect_vec();
    let live_fields = fields::table
        .filter(fields::id.eq_any(field_ids.clone()).and(fields::deleted.is_null()))
        .select(fields::id)
        .for_share()
        .load::<i32>(conn)
        .await?;
    all_live("fields", &field_ids, &live_fields)
}

fn all_live(noun: &str, requested: &[i32], live: &[i32]) -> Result<(), Error> {
    let absent = requested
        .iter()
        .filter(|id| !live.contains(*id))
        .sorted()
        .collect_vec();
    if absent.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(format!("{noun} {absent:?} do not exist")))
    }
}

impl Store {
    /// Inserts a form and binds `bindings` to it in one transaction.
    ///
    /// The `form_id` of each binding is replaced with the id of the new form.
    #[tracing::instrument(skip(self, new_form, bindings))]
    pub async fn create_form_with_fields(
        &self,
        new_form: models::NewForm,
        bindings: Vec<models::NewFormField>,
    ) -> Result<(models::Form, Vec<models::FormField>), Error> {
        self.connection()
            .await?
            .transaction(move |conn| {
                use schema::formdesk::{form_fields, forms};
                async move {
                    let form = diesel::insert_into(forms::table)
                        .values(new_form)
                        .returning(models::Form::as_returning())
                        .get_result(conn)
                        .await?;
                    if bindings.is_empty() {
                        return Ok((form, Vec::new()));
                    }
                    let bindings = bindings
                        .into_iter()
                        .map(|binding| models::NewFormField {
                            form_id: form.id,
                            ..binding
                        })
                        .collect_vec();
                    lock_binding_targets(conn, &bindings).await?;
                    let bindings = diesel::insert_into(form_fields::table)
                        .values(bindings)
                        .returning(models::FormField::as_returning())
                        .get_results(conn)
                        .await?;
                    Ok::<_, Error>((form, bindings))
                }
                .scope_boxed()
            })
            .await
    }

    /// Loads a form together with its bindings and their field definitions,
    /// in layout order. Bindings to tombstoned fields are left out.
    #[tracing::instrument(skip(self))]
    pub async fn load_form_with_fields(
        &self,
        form_id: i32,
    ) -> Result<(models::Form, Vec<(models::FormField, models::Field)>), Error> {
        use schema::formdesk::{fields, form_fields, forms};
        let mut conn = self.connection().await?;
        let form = forms::table
            .filter(forms::id.eq(form_id).and(forms::deleted.is_null()))
            .select(models::Form::as_select())
            .first(&mut conn)
            .await?;
        let bound_fields = form_fields::table
            .inner_join(fields::table)
            .filter(
                form_fields::form_id
                    .eq(form_id)
                    .and(fields::deleted.is_null()),
            )
            .order((form_fields::field_row, form_fields::id))
            .select((models::FormField::as_select(), models::Field::as_select()))
            .load(&mut conn)
            .await?;
        Ok((form, bound_fields))
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_form_status(
        &self,
        form_id: i32,
        status: Option<bool>,
    ) -> Result<models::Form, Error> {
        use schema::formdesk::forms;
        let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
        let mut conn = self.connection().await?;
        diesel::update(forms::table.filter(forms::id.eq(form_id).and(forms::deleted.is_null())))
            .set((forms::status.eq(status), forms::updated.eq(now)))
            .returning(models::Form::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(Into::into)
    }

    /// Binds one field to one form. Both must exist and be live.
    #[tracing::instrument(skip(self, binding))]
    pub async fn create_form_field(
        &self,
        binding: models::NewFormField,
    ) -> Result<models::FormField, Error> {
        self.connection()
            .await?
            .transaction(move |conn| {
                use schema::formdesk::form_fields;
                async move {
                    lock_binding_targets(conn, std::slice::from_ref(&binding)).await?;
                    let binding = diesel::insert_into(form_fields::table)
                        .values(binding)
                        .returning(models::FormField::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok::<_, Error>(binding)
                }
                .scope_boxed()
            })
            .await
    }

    /// Replaces a binding; the form and field it ends up pointing at must be live.
    #[tracing::instrument(skip(self, binding))]
    pub async fn update_form_field(
        &self,
        binding_id: i32,
        binding: models::NewFormField,
    ) -> Result<models::FormField, Error> {
        let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
        self.connection()
            .await?
            .transaction(move |conn| {
                use schema::formdesk::form_fields;
                async move {
                    lock_binding_targets(conn, std::slice::from_ref(&binding)).await?;
                    let binding = diesel::update(form_fields::table.find(binding_id))
                        .set((binding, form_fields::updated.eq(now)))
                        .returning(models::FormField::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok::<_, Error>(binding)
                }
                .scope_boxed()
            })
            .await
    }

    /// Inserts many bindings with a single statement: either every binding
    /// is stored or none is.
    #[tracing::instrument(skip(self, bindings), fields(count = bindings.len()))]
    pub async fn create_form_fields(
        &self,
        bindings: Vec<models::NewFormField>,
    ) -> Result<Vec<models::FormField>, Error> {
        if bindings.is_empty() {
            return Ok(Vec::new());
        }
        self.connection()
            .await?
            .transaction(move |conn| {
                use schema::formdesk::form_fields;
                async move {
                    lock_binding_targets(conn, &bindings).await?;
                    let bindings = diesel::insert_into(form_fields::table)
                        .values(bindings)
                        .returning(models::FormField::as_returning())
                        .get_results(conn)
                        .await?;
                    Ok::<_, Error>(bindings)
                }
                .scope_boxed()
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::all_live;
    use crate::Error;

    #[test]
    fn it_names_every_missing_target_in_order() {
        let err = all_live("fields", &[9, 3, 5], &[5]).unwrap_err();
        assert!(matches!(&err, Error::Validation(message) if message == "fields [3, 9] do not exist"));
    }

    #[test]
    fn it_accepts_targets_that_are_all_live() {
        assert!(all_live("forms", &[1, 2], &[2, 1]).is_ok());
    }
}
