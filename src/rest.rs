use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{crud, projects, tasks, users};
use crate::models::{
    notification::Notification, project::Project, routine::Routine, tag::Tag, task::Task,
    timelog::TimeLog,
};
use crate::store::Resource;
use crate::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route(
            "/users/me",
            get(users::me)
                .patch(users::update_me)
                .delete(users::delete_me),
        )
        .route(
            "/projects",
            get(projects::list).post(crud::create::<Project>),
        )
        .merge(item_routes::<Project>("/projects"))
        .route("/tasks", get(crud::list::<Task>).post(tasks::create))
        .merge(item_routes::<Task>("/tasks"))
        .merge(owned_routes::<Tag>("/tags"))
        .merge(owned_routes::<Routine>("/routines"))
        .merge(owned_routes::<TimeLog>("/timelogs"))
        .merge(owned_routes::<Notification>("/notifications"))
        .with_state(state)
}

/// Collection and item routes served entirely by the generic handlers.
fn owned_routes<R: Resource>(path: &str) -> Router<AppState> {
    Router::new()
        .route(path, get(crud::list::<R>).post(crud::create::<R>))
        .merge(item_routes::<R>(path))
}

fn item_routes<R: Resource>(path: &str) -> Router<AppState> {
    Router::new().route(
        &format!("{path}/:id"),
        get(crud::read::<R>)
            .patch(crud::update::<R>)
            .delete(crud::delete::<R>),
    )
}
