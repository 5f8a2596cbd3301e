use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        address::{Address, NewAddress, UpdateAddress},
        banner::{Banner, NewBanner, UpdateBanner},
        brand::{Brand, NewBrand, UpdateBrand},
        business::{BusinessProfile, SaveBusinessProfile},
        category::{Category, NewCategory, UpdateCategory},
        product::{NewProduct, Product, UpdateProduct},
        types::{
            AddressId, BannerId, BrandId, BusinessId, CategoryId, Email, EntityStatus, ProductId,
            UserId,
        },
        user::{NewUser, UpdateUser, User},
    },
    repository::errors::RepositoryResult,
};

pub mod address;
pub mod banner;
pub mod brand;
pub mod business;
pub mod category;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod product;
pub mod user;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// SQL `LIMIT`/`OFFSET`; pages past the end saturate to an empty slice.
    fn limit_offset(&self) -> (i64, i64) {
        let per_page = i64::try_from(self.per_page.max(1)).unwrap_or(i64::MAX);
        let page = i64::try_from(self.page.max(1)).unwrap_or(i64::MAX);
        (per_page, (page - 1).saturating_mul(per_page))
    }
}

/// Filters shared by every paginated list of a business's records.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub business_id: BusinessId,
    pub search: Option<String>,
    pub status: Option<EntityStatus>,
    pub pagination: Option<Pagination>,
}

impl ListQuery {
    pub fn new(business_id: BusinessId) -> Self {
        Self {
            business_id,
            search: None,
            status: None,
            pagination: None,
        }
    }

    /// Adds a search term; blank terms are ignored.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into().trim().to_string();
        self.search = (!term.is_empty()).then_some(term);
        self
    }

    pub fn status(mut self, status: EntityStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// `%term%` with LIKE wildcards in the term escaped by `\`.
    fn like_pattern(&self) -> Option<String> {
        self.search.as_ref().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for ch in term.chars() {
                if matches!(ch, '%' | '_' | '\\') {
                    pattern.push('\\');
                }
                pattern.push(ch);
            }
            pattern.push('%');
            pattern
        })
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId, business_id: BusinessId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(
        &self,
        email: &Email,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<User>>;
    fn list_users(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(
        &self,
        id: UserId,
        business_id: BusinessId,
        updates: &UpdateUser,
    ) -> RepositoryResult<User>;
    fn set_user_status(
        &self,
        id: UserId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<User>;
    fn delete_user(&self, id: UserId, business_id: BusinessId) -> RepositoryResult<bool>;
}

pub trait CategoryReader {
    fn get_category_by_id(
        &self,
        id: CategoryId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Category>>;
    fn list_categories(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Category>)>;
}

pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        id: CategoryId,
        business_id: BusinessId,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    fn set_category_status(
        &self,
        id: CategoryId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Category>;
    fn delete_category(&self, id: CategoryId, business_id: BusinessId) -> RepositoryResult<bool>;
}

pub trait BrandReader {
    fn get_brand_by_id(&self, id: BrandId, business_id: BusinessId)
    -> RepositoryResult<Option<Brand>>;
    fn list_brands(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Brand>)>;
}

pub trait BrandWriter {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
    fn update_brand(
        &self,
        id: BrandId,
        business_id: BusinessId,
        updates: &UpdateBrand,
    ) -> RepositoryResult<Brand>;
    fn set_brand_status(
        &self,
        id: BrandId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Brand>;
    fn delete_brand(&self, id: BrandId, business_id: BusinessId) -> RepositoryResult<bool>;
}

pub trait ProductReader {
    fn get_product_by_id(
        &self,
        id: ProductId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        id: ProductId,
        business_id: BusinessId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn set_product_status(
        &self,
        id: ProductId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, id: ProductId, business_id: BusinessId) -> RepositoryResult<bool>;
}

pub trait BannerReader {
    fn get_banner_by_id(
        &self,
        id: BannerId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Banner>>;
    fn list_banners(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Banner>)>;
}

pub trait BannerWriter {
    fn create_banner(&self, new_banner: &NewBanner) -> RepositoryResult<Banner>;
    fn update_banner(
        &self,
        id: BannerId,
        business_id: BusinessId,
        updates: &UpdateBanner,
    ) -> RepositoryResult<Banner>;
    fn set_banner_status(
        &self,
        id: BannerId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Banner>;
    fn delete_banner(&self, id: BannerId, business_id: BusinessId) -> RepositoryResult<bool>;
}

pub trait AddressReader {
    fn get_address_by_id(
        &self,
        id: AddressId,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<Address>>;
    fn list_addresses(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Address>)>;
}

pub trait AddressWriter {
    fn create_address(&self, new_address: &NewAddress) -> RepositoryResult<Address>;
    fn update_address(
        &self,
        id: AddressId,
        business_id: BusinessId,
        updates: &UpdateAddress,
    ) -> RepositoryResult<Address>;
    fn set_address_status(
        &self,
        id: AddressId,
        business_id: BusinessId,
        status: EntityStatus,
    ) -> RepositoryResult<Address>;
    fn delete_address(&self, id: AddressId, business_id: BusinessId) -> RepositoryResult<bool>;
}

pub trait BusinessReader {
    fn get_business_profile(
        &self,
        business_id: BusinessId,
    ) -> RepositoryResult<Option<BusinessProfile>>;
}

pub trait BusinessWriter {
    fn save_business_profile(
        &self,
        profile: &SaveBusinessProfile,
    ) -> RepositoryResult<BusinessProfile>;
}
