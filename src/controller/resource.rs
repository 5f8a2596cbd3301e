//! Binds the generic list machinery to the concrete entity services.
//!
//! [`Entity`] describes one managed table: its record, form and the service
//! calls behind it. The HTML routes, the JSON API and [`ServiceResource`]
//! (the [`ResourceService`] used by a [`super::ListController`]) are all
//! written once against this trait.

use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tera::Context;

use crate::controller::ResourceService;
use crate::controller::modal::{DraftForm, ImageUploader};
use crate::controller::state::FetchParams;
use crate::domain::Record;
use crate::domain::address::Address;
use crate::domain::banner::Banner;
use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::Product;
use crate::domain::types::EntityStatus;
use crate::domain::user::User;
use crate::dto::table::TableRecord;
use crate::forms::address::AddressForm;
use crate::forms::banner::BannerForm;
use crate::forms::brand::BrandForm;
use crate::forms::category::CategoryForm;
use crate::forms::product::ProductForm;
use crate::forms::upload::UploadImageForm;
use crate::forms::user::UserForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::ListPage;
use crate::repository::DieselRepository;
use crate::services::export::CsvRecord;
use crate::services::{
    ServiceError, ServiceResult, addresses, banners, brands, categories, products, upload, users,
};

/// Validated payload of an entity's form.
pub type PayloadOf<E> = <<E as Entity>::Form as DraftForm>::Payload;

/// One managed table.
pub trait Entity: 'static {
    type Record: Record + Clone + Serialize + TableRecord + CsvRecord + 'static;
    type Form: DraftForm<Record = Self::Record> + Serialize + DeserializeOwned + 'static;

    /// URL segment and template directory, e.g. `products`.
    const SLUG: &'static str;
    /// Singular name used in messages, e.g. `Product`.
    const LABEL: &'static str;
    /// Page heading, e.g. `Products`.
    const TITLE: &'static str;

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        params: &FetchParams,
    ) -> ServiceResult<ListPage<Self::Record>>;

    fn get(repo: &DieselRepository, user: &AuthenticatedUser, id: i32)
    -> ServiceResult<Self::Record>;

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        payload: PayloadOf<Self>,
    ) -> ServiceResult<Self::Record>;

    fn update(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: i32,
        payload: PayloadOf<Self>,
    ) -> ServiceResult<Self::Record>;

    fn set_status(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: i32,
        status: EntityStatus,
    ) -> ServiceResult<Self::Record>;

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: i32) -> ServiceResult<()>;

    fn export(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        params: &FetchParams,
    ) -> ServiceResult<Vec<u8>>;

    /// Extra template data the modal body needs, such as picker options.
    fn extend_modal(
        _repo: &DieselRepository,
        _user: &AuthenticatedUser,
        _context: &mut Context,
    ) -> ServiceResult<()> {
        Ok(())
    }
}

macro_rules! entity {
    (
        $marker:ident, $record:ty, $form:ty, $slug:literal, $label:literal, $title:literal,
        $service:ident :: { $list:ident, $get:ident, $create:ident, $update:ident,
            $status:ident, $delete:ident, $export:ident }
    ) => {
        pub struct $marker;

        impl Entity for $marker {
            type Record = $record;
            type Form = $form;

            const SLUG: &'static str = $slug;
            const LABEL: &'static str = $label;
            const TITLE: &'static str = $title;

            fn list(
                repo: &DieselRepository,
                user: &AuthenticatedUser,
                params: &FetchParams,
            ) -> ServiceResult<ListPage<$record>> {
                $service::$list(repo, user, params)
            }

            fn get(
                repo: &DieselRepository,
                user: &AuthenticatedUser,
                id: i32,
            ) -> ServiceResult<$record> {
                $service::$get(repo, user, id)
            }

            fn create(
                repo: &DieselRepository,
                user: &AuthenticatedUser,
                payload: PayloadOf<Self>,
            ) -> ServiceResult<$record> {
                $service::$create(repo, user, payload)
            }

            fn update(
                repo: &DieselRepository,
                user: &AuthenticatedUser,
                id: i32,
                payload: PayloadOf<Self>,
            ) -> ServiceResult<$record> {
                $service::$update(repo, user, id, payload)
            }

            fn set_status(
                repo: &DieselRepository,
                user: &AuthenticatedUser,
                id: i32,
                status: EntityStatus,
            ) -> ServiceResult<$record> {
                $service::$status(repo, user, id, status)
            }

            fn delete(
                repo: &DieselRepository,
                user: &AuthenticatedUser,
                id: i32,
            ) -> ServiceResult<()> {
                $service::$delete(repo, user, id)
            }

            fn export(
                repo: &DieselRepository,
                user: &AuthenticatedUser,
                params: &FetchParams,
            ) -> ServiceResult<Vec<u8>> {
                $service::$export(repo, user, params)
            }
        }
    };
}

entity!(
    Users, User, UserForm, "users", "User", "Users",
    users::{ list_users, get_user, create_user, update_user, set_user_status, delete_user,
        export_users }
);

entity!(
    Categories, Category, CategoryForm, "categories", "Category", "Categories",
    categories::{ list_categories, get_category, create_category, update_category,
        set_category_status, delete_category, export_categories }
);

entity!(
    Brands, Brand, BrandForm, "brands", "Brand", "Brands",
    brands::{ list_brands, get_brand, create_brand, update_brand, set_brand_status,
        delete_brand, export_brands }
);

entity!(
    Banners, Banner, BannerForm, "banners", "Banner", "Banners",
    banners::{ list_banners, get_banner, create_banner, update_banner, set_banner_status,
        delete_banner, export_banners }
);

entity!(
    Addresses, Address, AddressForm, "addresses", "Address", "Addresses",
    addresses::{ list_addresses, get_address, create_address, update_address,
        set_address_status, delete_address, export_addresses }
);

/// Products also need the category and brand pickers in their modal.
pub struct Products;

impl Entity for Products {
    type Record = Product;
    type Form = ProductForm;

    const SLUG: &'static str = "products";
    const LABEL: &'static str = "Product";
    const TITLE: &'static str = "Products";

    fn list(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        params: &FetchParams,
    ) -> ServiceResult<ListPage<Product>> {
        products::list_products(repo, user, params)
    }

    fn get(repo: &DieselRepository, user: &AuthenticatedUser, id: i32) -> ServiceResult<Product> {
        products::get_product(repo, user, id)
    }

    fn create(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        payload: PayloadOf<Self>,
    ) -> ServiceResult<Product> {
        products::create_product(repo, user, payload)
    }

    fn update(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: i32,
        payload: PayloadOf<Self>,
    ) -> ServiceResult<Product> {
        products::update_product(repo, user, id, payload)
    }

    fn set_status(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        id: i32,
        status: EntityStatus,
    ) -> ServiceResult<Product> {
        products::set_product_status(repo, user, id, status)
    }

    fn delete(repo: &DieselRepository, user: &AuthenticatedUser, id: i32) -> ServiceResult<()> {
        products::delete_product(repo, user, id)
    }

    fn export(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        params: &FetchParams,
    ) -> ServiceResult<Vec<u8>> {
        products::export_products(repo, user, params)
    }

    fn extend_modal(
        repo: &DieselRepository,
        user: &AuthenticatedUser,
        context: &mut Context,
    ) -> ServiceResult<()> {
        let (categories, brands) = products::load_reference_options(repo, user)?;
        context.insert("categories", &categories);
        context.insert("brands", &brands);
        Ok(())
    }
}

/// [`ResourceService`] backed by the real services, acting as `user`.
pub struct ServiceResource<E> {
    repo: DieselRepository,
    user: AuthenticatedUser,
    entity: PhantomData<E>,
}

impl<E: Entity> ServiceResource<E> {
    pub fn new(repo: DieselRepository, user: AuthenticatedUser) -> Self {
        Self {
            repo,
            user,
            entity: PhantomData,
        }
    }
}

impl<E: Entity> ResourceService for ServiceResource<E> {
    type Record = E::Record;
    type Payload = PayloadOf<E>;
    type Error = ServiceError;

    fn fetch(&self, params: &FetchParams) -> ServiceResult<ListPage<E::Record>> {
        E::list(&self.repo, &self.user, params)
    }

    fn create(&self, payload: Self::Payload) -> ServiceResult<E::Record> {
        E::create(&self.repo, &self.user, payload)
    }

    fn update(&self, id: i32, payload: Self::Payload) -> ServiceResult<E::Record> {
        E::update(&self.repo, &self.user, id, payload)
    }

    fn update_status(&self, id: i32, status: EntityStatus) -> ServiceResult<E::Record> {
        E::set_status(&self.repo, &self.user, id, status)
    }

    fn delete(&self, id: i32) -> ServiceResult<()> {
        E::delete(&self.repo, &self.user, id)
    }
}

/// [`ImageUploader`] writing into the local upload directory.
pub struct DiskUploader {
    user: AuthenticatedUser,
    upload_dir: PathBuf,
}

impl DiskUploader {
    pub fn new(user: AuthenticatedUser, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            user,
            upload_dir: upload_dir.into(),
        }
    }
}

impl ImageUploader for DiskUploader {
    type Error = ServiceError;

    fn upload(&self, image: UploadImageForm) -> ServiceResult<String> {
        upload::upload_image(&self.user, image, &self.upload_dir)
    }
}
