//! SeaORM-backed repository implementation for the domain port.
//!
//! This struct is generic over `C: ConnectionTrait`, so it can be constructed
//! with a `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::contract::model::{Contact, ContactId, ContactUpdate, NewContact};
use crate::domain::repo::ContactsRepository;
use crate::infra::storage::entity::{ActiveModel as ContactAM, Column, Entity as ContactEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmContactsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmContactsRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> ContactsRepository for SeaOrmContactsRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ContactId) -> anyhow::Result<Option<Contact>> {
        let found = ContactEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Contact>> {
        let rows = ContactEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("list_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, c: NewContact) -> anyhow::Result<ContactId> {
        let m = ContactAM {
            id: NotSet,
            name: Set(c.name),
            phone: Set(c.phone),
            email: Set(c.email),
        };
        let res = ContactEntity::insert(m)
            .exec(&self.conn)
            .await
            .context("insert failed")?;
        Ok(res.last_insert_id)
    }

    async fn update(&self, id: ContactId, c: ContactUpdate) -> anyhow::Result<bool> {
        // Single UPDATE ... WHERE id = ?; an unknown id simply matches no rows
        let res = ContactEntity::update_many()
            .col_expr(Column::Name, Expr::value(c.name))
            .col_expr(Column::Phone, Expr::value(c.phone))
            .col_expr(Column::Email, Expr::value(c.email))
            .filter(Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("update failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: ContactId) -> anyhow::Result<bool> {
        let res = ContactEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }
}
