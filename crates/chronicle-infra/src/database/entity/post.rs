//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub image_url: Option<String>,
    pub pub_date: DateTimeWithTimeZone,
    pub is_published: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Location,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for chronicle_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            category_id: model.category_id,
            location_id: model.location_id,
            title: model.title,
            text: model.text,
            image_url: model.image_url,
            pub_date: model.pub_date.into(),
            is_published: model.is_published,
            created_at: model.created_at.into(),
        }
    }
}

impl From<chronicle_core::domain::Post> for ActiveModel {
    fn from(post: chronicle_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            category_id: Set(post.category_id),
            location_id: Set(post.location_id),
            title: Set(post.title),
            text: Set(post.text),
            image_url: Set(post.image_url),
            pub_date: Set(post.pub_date.into()),
            is_published: Set(post.is_published),
            created_at: Set(post.created_at.into()),
        }
    }
}
