//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, book_instances, books, genres, health, home};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblion API",
        version = "0.3.0",
        description = "Library catalog web application",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Home & health
        home::index,
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::create_author_form,
        authors::create_author,
        authors::update_author_form,
        authors::update_author,
        authors::delete_author_view,
        authors::delete_author,
        // Books
        books::list_books,
        books::get_book,
        books::create_book_form,
        books::create_book,
        books::update_book_form,
        books::update_book,
        books::delete_book_view,
        books::delete_book,
        // Genres
        genres::list_genres,
        genres::get_genre,
        genres::create_genre_form,
        genres::create_genre,
        genres::update_genre_form,
        genres::update_genre,
        genres::delete_genre_view,
        genres::delete_genre,
        // Book instances
        book_instances::list_instances,
        book_instances::get_instance,
        book_instances::create_instance_form,
        book_instances::create_instance,
        book_instances::update_instance_form,
        book_instances::update_instance,
        book_instances::delete_instance_view,
        book_instances::delete_instance,
    ),
    components(
        schemas(
            // Records
            crate::models::author::Author,
            crate::models::author::AuthorForm,
            crate::models::genre::Genre,
            crate::models::genre::GenreForm,
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookListRow,
            crate::models::book::BookTitle,
            crate::models::book::BookForm,
            crate::models::book_instance::BookInstance,
            crate::models::book_instance::InstanceStatus,
            crate::models::book_instance::InstanceListRow,
            crate::models::book_instance::BookInstanceForm,
            // Views
            authors::AuthorDetailView,
            authors::AuthorFormValues,
            authors::AuthorFormView,
            authors::AuthorDeleteView,
            genres::GenreDetailView,
            genres::GenreFormValues,
            genres::GenreFormView,
            genres::GenreDeleteView,
            books::BookDetailView,
            books::GenreChoice,
            books::BookFormValues,
            books::BookFormView,
            books::BookDeleteView,
            book_instances::InstanceFormValues,
            book_instances::InstanceFormView,
            book_instances::InstanceDeleteView,
            home::CatalogCounts,
            home::HomeView,
            health::HealthResponse,
            // Validation & errors
            crate::forms::FieldMessage,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "home", description = "Landing page"),
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management"),
        (name = "genres", description = "Genre management"),
        (name = "bookinstances", description = "Physical copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
