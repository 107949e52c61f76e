//! Subcommands, each one action on the store followed by the matching view.

use clap::{Args, Subcommand};
use quill_client::views::{
    self, CategoryForm, LoginForm, PostForm, RegisterForm, category_list, layout, post,
    post_list,
};
use quill_client::{ActionResult, ClientError, Navigator, Route, Store};
use quill_shared::check;
use quill_shared::dto::{
    PostsQuery, ProfileData, UpdateDetailsRequest, UpdatePasswordRequest, UpdatePostRequest,
};
use uuid::Uuid;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the API is up.
    Health,
    Register {
        username: String,
        email: String,
        password: String,
        /// Repeat the password; defaults to the password itself.
        #[arg(long)]
        confirm: Option<String>,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    /// Show the signed-in user.
    Me,
    UpdateDetails(DetailsArgs),
    UpdatePassword {
        current: String,
        new: String,
    },
    /// List posts.
    Posts(ListArgs),
    /// Read one post. Counts as a view.
    Post {
        id: Uuid,
    },
    NewPost(PostArgs),
    EditPost {
        id: Uuid,
        #[command(flatten)]
        changes: EditArgs,
    },
    DeletePost {
        id: Uuid,
    },
    /// Like a post, or take the like back.
    Like {
        id: Uuid,
    },
    /// Published posts of one category.
    CategoryPosts {
        id: Uuid,
    },
    Categories,
    NewCategory {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change a category; omitted fields keep their current value.
    EditCategory {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    DeleteCategory {
        id: Uuid,
    },
    Tags,
}

#[derive(Args, Debug)]
pub struct DetailsArgs {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    website: Option<String>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, default_value_t = 1)]
    page: u64,
    #[arg(long, default_value_t = 10)]
    limit: u64,
    #[arg(long)]
    category: Option<Uuid>,
    #[arg(long)]
    search: Option<String>,
    /// `true`, `false` or `all`.
    #[arg(long)]
    published: Option<String>,
}

#[derive(Args, Debug)]
pub struct PostArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    content: String,
    #[arg(long)]
    category: Uuid,
    #[arg(long)]
    excerpt: Option<String>,
    /// Comma separated tag names.
    #[arg(long, default_value = "")]
    tags: String,
    #[arg(long)]
    publish: bool,
    #[arg(long)]
    image: Option<String>,
}

#[derive(Args, Debug)]
pub struct EditArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    content: Option<String>,
    #[arg(long)]
    excerpt: Option<String>,
    #[arg(long)]
    category: Option<Uuid>,
    /// Comma separated tag names; replaces the current set.
    #[arg(long)]
    tags: Option<String>,
    #[arg(long)]
    published: Option<bool>,
    #[arg(long)]
    image: Option<String>,
}

pub async fn run(command: Command, store: &Store, navigator: &Navigator) -> anyhow::Result<()> {
    let (result, body) = match command {
        Command::Health => {
            let health = store.api().health().await;
            let result = health.map(|h| {
                println!(
                    "{} ({}, {} store) at {}",
                    h.status, h.environment, h.database, h.timestamp
                )
            });
            return finish(result, navigator);
        }
        Command::Register {
            username,
            email,
            password,
            confirm,
        } => {
            let form = RegisterForm {
                confirm_password: confirm.unwrap_or_else(|| password.clone()),
                username,
                email,
                password,
            };
            match form.request() {
                Ok(request) => (store.register(request).await, String::new()),
                Err(err) => return form_failure(form.render(Some(&err)), err),
            }
        }
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            match form.request() {
                Ok(request) => (store.login(request).await, String::new()),
                Err(err) => return form_failure(form.render(Some(&err)), err),
            }
        }
        Command::Logout => (store.logout().await, "Signed out.\n".to_string()),
        Command::Me => (store.load_user().await, String::new()),
        Command::UpdateDetails(args) => {
            let profile = ProfileData {
                first_name: args.first_name,
                last_name: args.last_name,
                bio: args.bio,
                website: args.website,
                avatar: None,
            };
            let request = UpdateDetailsRequest {
                username: args.username,
                email: args.email,
                profile: (profile != ProfileData::default()).then_some(profile),
            };
            check(&request).map_err(ClientError::Validation)?;
            (store.update_details(request).await, String::new())
        }
        Command::UpdatePassword { current, new } => {
            let request = UpdatePasswordRequest {
                current_password: current,
                new_password: new,
            };
            check(&request).map_err(ClientError::Validation)?;
            (
                store.update_password(request).await,
                "Password updated.\n".to_string(),
            )
        }
        Command::Posts(args) => {
            let query = PostsQuery {
                page: Some(args.page),
                limit: Some(args.limit),
                category: args.category.map(|id| id.to_string()),
                search: args.search,
                published: args.published,
            };
            let result = store.load_posts(query).await;
            (result, post_list::render(&store.snapshot()))
        }
        Command::Post { id } => {
            let result = store.load_post(id).await;
            (result, post::render(&store.snapshot()))
        }
        Command::NewPost(args) => {
            let form = PostForm {
                title: args.title,
                content: args.content,
                excerpt: args.excerpt.unwrap_or_default(),
                category: args.category.to_string(),
                tags: args.tags,
                published: args.publish,
                featured_image: args.image.unwrap_or_default(),
            };
            match form.create_request() {
                Ok(request) => {
                    let result = store.create_post(request).await;
                    let state = store.snapshot();
                    let body = match (&result, state.posts.first()) {
                        (Ok(()), Some(created)) => post_list::summary(created),
                        _ => String::new(),
                    };
                    (result, body)
                }
                Err(err) => return form_failure(form.render(&store.snapshot(), Some(&err)), err),
            }
        }
        Command::EditPost { id, changes } => {
            let request = UpdatePostRequest {
                title: changes.title,
                content: changes.content,
                excerpt: changes.excerpt,
                category: changes.category.map(|c| c.to_string()),
                tags: changes.tags.as_deref().map(views::post_form::split_tags),
                published: changes.published,
                featured_image: changes.image,
            };
            check(&request).map_err(ClientError::Validation)?;
            (store.update_post(id, request).await, format!("Updated post {id}.\n"))
        }
        Command::DeletePost { id } => (store.delete_post(id).await, "Post removed.\n".to_string()),
        Command::Like { id } => (
            store.toggle_like(id).await,
            format!("Toggled like on post {id}.\n"),
        ),
        Command::CategoryPosts { id } => {
            let result = store.load_category_posts(id).await;
            (result, post_list::render(&store.snapshot()))
        }
        Command::Categories => {
            let result = store.load_categories().await;
            (result, category_list::render(&store.snapshot()))
        }
        Command::NewCategory { name, description } => {
            let form = CategoryForm {
                name,
                description: description.unwrap_or_default(),
            };
            match form.request() {
                Ok(request) => {
                    let result = store.create_category(request).await;
                    (result, category_list::render(&store.snapshot()))
                }
                Err(err) => return form_failure(form.render(Some(&err)), err),
            }
        }
        Command::EditCategory {
            id,
            name,
            description,
        } => {
            let current = match store.api().get_category(id).await {
                Ok(category) => category,
                Err(err) => return finish(Err(err), navigator),
            };
            let mut form = CategoryForm::from_category(&current);
            if let Some(name) = name {
                form.name = name;
            }
            if let Some(description) = description {
                form.description = description;
            }
            match form.request() {
                Ok(request) => (
                    store.update_category(id, request).await,
                    format!("Updated category {id}.\n"),
                ),
                Err(err) => return form_failure(form.render(Some(&err)), err),
            }
        }
        Command::DeleteCategory { id } => (
            store.delete_category(id).await,
            "Category removed.\n".to_string(),
        ),
        Command::Tags => {
            let tags = store.api().list_tags().await;
            let result = tags.map(|tags| {
                for tag in tags {
                    println!("{} ({})", tag.name, tag.slug);
                }
            });
            return finish(result, navigator);
        }
    };

    let state = store.snapshot();
    if result.is_ok() {
        print!("{}", layout::page(&state, &body));
    }
    finish(result, navigator)
}

fn form_failure(rendered: String, err: ClientError) -> anyhow::Result<()> {
    eprint!("{rendered}");
    Err(err.into())
}

fn finish(result: ActionResult, navigator: &Navigator) -> anyhow::Result<()> {
    let Err(err) = result else {
        return Ok(());
    };

    if navigator.current() == Route::Login {
        eprintln!("Your session has ended. Sign in again with `quill login`.");
    }
    for field in err.field_errors() {
        eprintln!("  {}: {}", field.field, field.message);
    }
    Err(err.into())
}
