use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u32,
    pub id: u32,
    pub title: String,
    pub body: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsQuery {
    pub user_id: Option<u32>,
}

pub const POSTS_PER_USER: u32 = 10;

/// Read-only data served by the mock API.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
}

// (name, username, email, city, company, catch phrase)
const SEED: [(&str, &str, &str, &str, &str, &str); 10] = [
    (
        "Leanne Graham",
        "Bret",
        "Sincere@april.biz",
        "Gwenborough",
        "Romaguera-Crona",
        "Multi-layered client-server neural-net",
    ),
    (
        "Ervin Howell",
        "Antonette",
        "Shanna@melissa.tv",
        "Wisokyburgh",
        "Deckow-Crist",
        "Proactive didactic contingency",
    ),
    (
        "Clementine Bauch",
        "Samantha",
        "Nathan@yesenia.net",
        "McKenziehaven",
        "Romaguera-Jacobson",
        "Face to face bifurcated interface",
    ),
    (
        "Patricia Lebsack",
        "Karianne",
        "Julianne.OConner@kory.org",
        "South Elvis",
        "Robel-Corkery",
        "Multi-tiered zero tolerance productivity",
    ),
    (
        "Chelsey Dietrich",
        "Kamren",
        "Lucio_Hettinger@annie.ca",
        "Roscoeview",
        "Keebler LLC",
        "User-centric fault-tolerant solution",
    ),
    (
        "Mrs. Dennis Schulist",
        "Leopoldo_Corkery",
        "Karley_Dach@jasper.info",
        "South Christy",
        "Considine-Lockman",
        "Synchronised bottom-line interface",
    ),
    (
        "Kurtis Weissnat",
        "Elwyn.Skiles",
        "Telly.Hoeger@billy.biz",
        "Howemouth",
        "Johns Group",
        "Configurable multimedia task-force",
    ),
    (
        "Nicholas Runolfsdottir V",
        "Maxime_Nienow",
        "Sherwood@rosamond.me",
        "Aliyaview",
        "Abernathy Group",
        "Implemented secondary concept",
    ),
    (
        "Glenna Reichert",
        "Delphine",
        "Chaim_McDermott@dana.io",
        "Bartholomebury",
        "Yost and Sons",
        "Switchable contextually-based project",
    ),
    (
        "Clementina DuBuque",
        "Moriah.Stanton",
        "Rey.Padberg@karina.biz",
        "Lebsackbury",
        "Hoeger LLC",
        "Centralized empowering task-force",
    ),
];

impl Dataset {
    /// Ten users with ten posts each, ids laid out like JSONPlaceholder
    /// (posts 1-10 belong to user 1, 11-20 to user 2, ...).
    pub fn seeded() -> Self {
        let users: Vec<User> = SEED
            .iter()
            .zip(1u32..)
            .map(|(&(name, username, email, city, company, catch_phrase), id)| User {
                id,
                name: name.to_string(),
                username: username.to_string(),
                email: email.to_string(),
                address: Address {
                    street: format!("{id} Main Street"),
                    suite: format!("Apt. {}", 100 + id),
                    city: city.to_string(),
                    zipcode: format!("{:05}", 10000 + id),
                    geo: Geo {
                        lat: format!("{:.4}", -37.0 + f64::from(id)),
                        lng: format!("{:.4}", 81.0 + f64::from(id)),
                    },
                },
                phone: format!("1-770-736-80{id:02}"),
                website: format!("{}.example", username.to_lowercase()),
                company: Company {
                    name: company.to_string(),
                    catch_phrase: catch_phrase.to_string(),
                    bs: "harness real-time e-markets".to_string(),
                },
            })
            .collect();

        let posts = users
            .iter()
            .flat_map(|user| {
                (1..=POSTS_PER_USER).map(move |n| Post {
                    user_id: user.id,
                    id: (user.id - 1) * POSTS_PER_USER + n,
                    title: format!("{} writes, part {n}", user.username),
                    body: format!("Post {n} of {POSTS_PER_USER} by {}.", user.name),
                })
            })
            .collect();

        Self { users, posts }
    }
}

pub type Db = Arc<Dataset>;

pub fn app() -> Router {
    app_with(Dataset::seeded())
}

pub fn app_with(dataset: Dataset) -> Router {
    let db: Db = Arc::new(dataset);
    Router::new()
        .route("/users/{id}", get(get_user))
        .route("/posts", get(list_posts))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Unknown ids answer 404 with an empty object, as JSONPlaceholder does.
async fn get_user(
    State(db): State<Db>,
    Path(id): Path<u32>,
) -> Result<Json<User>, (StatusCode, Json<Value>)> {
    db.users
        .iter()
        .find(|u| u.id == id)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, Json(json!({}))))
}

async fn list_posts(State(db): State<Db>, Query(query): Query<PostsQuery>) -> Json<Vec<Post>> {
    let posts = db
        .posts
        .iter()
        .filter(|p| query.user_id.map_or(true, |id| p.user_id == id))
        .cloned()
        .collect();
    Json(posts)
}
