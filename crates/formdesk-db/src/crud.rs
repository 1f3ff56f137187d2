//! Create / load / list / replace / delete for every entity.
//!
//! Updates overwrite every mutable column of the row (`NULL` for absent
//! optional values) and refresh `updated`. Deleting a row that does not
//! exist is reported as [`Error::NotFound`]. Tables carrying a `deleted`
//! tombstone use the `*_live` operations and `tombstone`: tombstoned rows
//! behave as absent.

use crate::{models, Error, Store};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

/// `impl_crud! { Table t, Model M, New N; create => create_m, ... }` emits
/// one `Store` method per `operation => method` pair.
macro_rules! impl_crud {
    {
        Table $table:ident, Model $model:ident, New $new:ident;
        $($op:ident => $method:ident),+ $(,)?
    } => {
        $( impl_crud!(@$op $table, $model, $new, $method); )+
    };
    (@create $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self, record))]
            pub async fn $method(&self, record: models::$new) -> Result<models::$model, Error> {
                use crate::schema::formdesk::$table;
                let mut conn = self.connection().await?;
                diesel::insert_into($table::table)
                    .values(record)
                    .returning(models::$model::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(Into::into)
            }
        }
    };
    (@load $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, record_id: i32) -> Result<models::$model, Error> {
                use crate::schema::formdesk::$table;
                let mut conn = self.connection().await?;
                $table::table
                    .find(record_id)
                    .select(models::$model::as_select())
                    .first(&mut conn)
                    .await
                    .map_err(Into::into)
            }
        }
    };
    (@load_live $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, record_id: i32) -> Result<models::$model, Error> {
                use crate::schema::formdesk::$table;
                let mut conn = self.connection().await?;
                $table::table
                    .filter($table::id.eq(record_id).and($table::deleted.is_null()))
                    .select(models::$model::as_select())
                    .first(&mut conn)
                    .await
                    .map_err(Into::into)
            }
        }
    };
    (@list $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self) -> Result<Vec<models::$model>, Error> {
                use crate::schema::formdesk::$table;
                let mut conn = self.connection().await?;
                $table::table
                    .order($table::id)
                    .select(models::$model::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(Into::into)
            }
        }
    };
    (@list_live $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self) -> Result<Vec<models::$model>, Error> {
                use crate::schema::formdesk::$table;
                let mut conn = self.connection().await?;
                $table::table
                    .filter($table::deleted.is_null())
                    .order($table::id)
                    .select(models::$model::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(Into::into)
            }
        }
    };
    (@update $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self, record))]
            pub async fn $method(
                &self,
                record_id: i32,
                record: models::$new,
            ) -> Result<models::$model, Error> {
                use crate::schema::formdesk::$table;
                let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
                let mut conn = self.connection().await?;
                diesel::update($table::table.find(record_id))
                    .set((record, $table::updated.eq(now)))
                    .returning(models::$model::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(Into::into)
            }
        }
    };
    (@update_live $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self, record))]
            pub async fn $method(
                &self,
                record_id: i32,
                record: models::$new,
            ) -> Result<models::$model, Error> {
                use crate::schema::formdesk::$table;
                let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
                let mut conn = self.connection().await?;
                diesel::update(
                    $table::table.filter($table::id.eq(record_id).and($table::deleted.is_null())),
                )
                .set((record, $table::updated.eq(now)))
                .returning(models::$model::as_returning())
                .get_result(&mut conn)
                .await
                .map_err(Into::into)
            }
        }
    };
    (@delete $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, record_id: i32) -> Result<(), Error> {
                use crate::schema::formdesk::$table;
                let mut conn = self.connection().await?;
                match diesel::delete($table::table.find(record_id))
                    .execute(&mut conn)
                    .await
                {
                    Ok(0) => Err(Error::NotFound),
                    Ok(_) => Ok(()),
                    Err(err) => Err(err.into()),
                }
            }
        }
    };
    (@tombstone $table:ident, $model:ident, $new:ident, $method:ident) => {
        impl Store {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, record_id: i32) -> Result<(), Error> {
                use crate::schema::formdesk::$table;
                let now: jiff_diesel::Timestamp = jiff::Timestamp::now().into();
                let mut conn = self.connection().await?;
                match diesel::update(
                    $table::table.filter($table::id.eq(record_id).and($table::deleted.is_null())),
                )
                .set(($table::deleted.eq(Some(now)), $table::updated.eq(now)))
                .execute(&mut conn)
                .await
                {
                    Ok(0) => Err(Error::NotFound),
                    Ok(_) => Ok(()),
                    Err(err) => Err(err.into()),
                }
            }
        }
    };
}

impl_crud! {
    Table users, Model User, New NewUser;
    create => create_user,
    load => load_user,
    list => list_users,
    update => update_user,
    delete => delete_user,
}

impl_crud! {
    Table services, Model Service, New NewService;
    create => create_service,
    load => load_service,
    list => list_services,
    update => update_service,
    delete => delete_service,
}

impl_crud! {
    Table data_types, Model DataType, New NewDataType;
    create => create_data_type,
    load => load_data_type,
    list => list_data_types,
    update => update_data_type,
    delete => delete_data_type,
}

impl_crud! {
    Table groups, Model Group, New NewGroup;
    create => create_group,
    load => load_group,
    list => list_groups,
    update => update_group,
    delete => delete_group,
}

impl_crud! {
    Table form_groups, Model FormGroup, New NewFormGroup;
    create => create_form_group,
    load => load_form_group,
    list => list_form_groups,
    update => update_form_group,
    delete => delete_form_group,
}

impl_crud! {
    Table collections, Model Collection, New NewCollection;
    create => create_collection,
    load => load_collection,
    list => list_collections,
    update => update_collection,
    delete => delete_collection,
}

impl_crud! {
    Table collection_items, Model CollectionItem, New NewCollectionItem;
    create => create_collection_item,
    load => load_collection_item,
    list => list_collection_items,
    update => update_collection_item,
    delete => delete_collection_item,
}

impl_crud! {
    Table fields, Model Field, New NewField;
    create => create_field,
    load_live => load_field,
    list_live => list_fields,
    update_live => update_field,
    tombstone => delete_field,
}

impl_crud! {
    Table forms, Model Form, New NewForm;
    create => create_form,
    load_live => load_form,
    list_live => list_forms,
    update_live => update_form,
    tombstone => delete_form,
}

// Binding writes check their targets, see `forms.rs`.
impl_crud! {
    Table form_fields, Model FormField, New NewFormField;
    load => load_form_field,
    list => list_form_fields,
    delete => delete_form_field,
}

impl_crud! {
    Table submissions, Model Submission, New NewSubmission;
    create => create_submission,
    load => load_submission,
    list => list_submissions,
    update => update_submission,
    delete => delete_submission,
}

impl_crud! {
    Table form_answers, Model FormAnswer, New NewFormAnswer;
    create => create_form_answer,
    load => load_form_answer,
    list => list_form_answers,
    update => update_form_answer,
    delete => delete_form_answer,
}

impl_crud! {
    Table reserved_names, Model ReservedName, New NewReservedName;
    create => create_reserved_name,
    load => load_reserved_name,
    list => list_reserved_names,
    update => update_reserved_name,
    delete => delete_reserved_name,
}
