//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::address::{Address, NewAddress, UpdateAddress};
use crate::domain::banner::{Banner, NewBanner, UpdateBanner};
use crate::domain::brand::{Brand, NewBrand, UpdateBrand};
use crate::domain::business::{BusinessProfile, SaveBusinessProfile};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::types::{
    AddressId, BannerId, BrandId, BusinessId, CategoryId, Email, EntityStatus, ProductId, UserId,
};
use crate::domain::user::{NewUser, UpdateUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AddressReader, AddressWriter, BannerReader, BannerWriter, BrandReader, BrandWriter,
    BusinessReader, BusinessWriter, CategoryReader, CategoryWriter, ListQuery, ProductReader,
    ProductWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId, business_id: BusinessId) -> RepositoryResult<Option<User>>;
        fn get_user_by_email(
            &self,
            email: &Email,
            business_id: BusinessId,
        ) -> RepositoryResult<Option<User>>;
        fn list_users(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<User>)>;
    }

    impl UserWriter for Repository {
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

    impl CategoryReader for Repository {
        fn get_category_by_id(
            &self,
            id: CategoryId,
            business_id: BusinessId,
        ) -> RepositoryResult<Option<Category>>;
        fn list_categories(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Category>)>;
    }

    impl CategoryWriter for Repository {
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

    impl BrandReader for Repository {
        fn get_brand_by_id(&self, id: BrandId, business_id: BusinessId) -> RepositoryResult<Option<Brand>>;
        fn list_brands(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Brand>)>;
    }

    impl BrandWriter for Repository {
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

    impl ProductReader for Repository {
        fn get_product_by_id(
            &self,
            id: ProductId,
            business_id: BusinessId,
        ) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }

    impl ProductWriter for Repository {
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

    impl BannerReader for Repository {
        fn get_banner_by_id(&self, id: BannerId, business_id: BusinessId) -> RepositoryResult<Option<Banner>>;
        fn list_banners(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Banner>)>;
    }

    impl BannerWriter for Repository {
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

    impl AddressReader for Repository {
        fn get_address_by_id(
            &self,
            id: AddressId,
            business_id: BusinessId,
        ) -> RepositoryResult<Option<Address>>;
        fn list_addresses(&self, query: &ListQuery) -> RepositoryResult<(usize, Vec<Address>)>;
    }

    impl AddressWriter for Repository {
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

    impl BusinessReader for Repository {
        fn get_business_profile(
            &self,
            business_id: BusinessId,
        ) -> RepositoryResult<Option<BusinessProfile>>;
    }

    impl BusinessWriter for Repository {
        fn save_business_profile(
            &self,
            profile: &SaveBusinessProfile,
        ) -> RepositoryResult<BusinessProfile>;
    }
}
