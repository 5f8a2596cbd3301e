use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::domain::types::{
    BusinessId, CategoryId, CategoryName, Description, TypeConstraintError, WebUrl,
};
use crate::models::optional;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub business_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub business_id: i32,
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub status: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCategory<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CategoryId::new(category.id)?,
            business_id: BusinessId::new(category.business_id)?,
            name: CategoryName::new(category.name)?,
            description: optional(category.description, Description::new)?,
            image_url: optional(category.image_url, WebUrl::new)?,
            status: category.status.parse()?,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCategory> for NewCategory<'a> {
    fn from(category: &'a DomainNewCategory) -> Self {
        Self {
            business_id: category.business_id.get(),
            name: category.name.as_str(),
            description: category.description.as_ref().map(Description::as_str),
            image_url: category.image_url.as_ref().map(WebUrl::as_str),
            status: category.status.as_str(),
        }
    }
}

impl<'a> From<&'a DomainUpdateCategory> for UpdateCategory<'a> {
    fn from(category: &'a DomainUpdateCategory) -> Self {
        Self {
            name: category.name.as_str(),
            description: category.description.as_ref().map(Description::as_str),
            image_url: category.image_url.as_ref().map(WebUrl::as_str),
        }
    }
}
