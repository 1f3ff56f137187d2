use crate::{models, schema, sql_functions::lower, Error, Store};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

impl Store {
    /// Reserved names containing `query`, ignoring case.
    ///
    /// `query` is matched literally; `%` and `_` carry no wildcard meaning.
    #[tracing::instrument(skip(self))]
    pub async fn search_reserved_names(
        &self,
        query: &str,
    ) -> Result<Vec<models::ReservedName>, Error> {
        use schema::formdesk::reserved_names;
        let mut conn = self.connection().await?;
        reserved_names::table
            .filter(reserved_names::name.ilike(contains_pattern(query)))
            .order(reserved_names::id)
            .select(models::ReservedName::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self))]
    pub async fn load_user_by_email(&self, address: &str) -> Result<models::User, Error> {
        use schema::formdesk::users::dsl::*;
        let mut conn = self.connection().await?;
        users
            .filter(lower(email).eq(lower(address)))
            .select(models::User::as_select())
            .first(&mut conn)
            .await
            .map_err(Into::into)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_items_of_collection(
        &self,
        collection: i32,
    ) -> Result<Vec<models::CollectionItem>, Error> {
        use schema::formdesk::collection_items;
        let mut conn = self.connection().await?;
        collection_items::table
            .filter(collection_items::collection_id.eq(collection))
            .order(collection_items::id)
            .select(models::CollectionItem::as_select())
            .load(&mut conn)
            .await
            .map_err(Into::into)
    }
}

/// `LIKE` pattern matching any value that contains `query` verbatim.
pub(crate) fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
