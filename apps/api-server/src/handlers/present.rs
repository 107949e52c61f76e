//! Domain -> wire mappings. The stored password hash has no path out of here.

use quill_core::domain::{Category, Profile, Tag, User};
use quill_core::services::PostDetails;
use quill_shared::dto::{
    AuthorSummary, CategoryResponse, CategorySummary, PostResponse, ProfileData, TagResponse,
    TagSummary, UserResponse,
};

pub fn profile(profile: &Profile) -> ProfileData {
    ProfileData {
        first_name: profile.first_name.clone(),
        last_name: profile.last_name.clone(),
        bio: profile.bio.clone(),
        avatar: profile.avatar.clone(),
        website: profile.website.clone(),
    }
}

pub fn profile_from(data: ProfileData) -> Profile {
    Profile {
        first_name: data.first_name,
        last_name: data.last_name,
        bio: data.bio,
        avatar: data.avatar,
        website: data.website,
    }
}

pub fn user(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
        profile: profile(&user.profile),
        created_at: user.created_at,
    }
}

pub fn category(category: Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name,
        slug: category.slug,
        description: category.description,
        created_by: category.created_by,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

pub fn tag(tag: Tag) -> TagResponse {
    TagResponse {
        id: tag.id,
        name: tag.name,
        slug: tag.slug,
        description: tag.description,
        created_at: tag.created_at,
        updated_at: tag.updated_at,
    }
}

pub fn post(details: PostDetails) -> PostResponse {
    let PostDetails {
        post,
        author,
        category,
        tags,
    } = details;

    PostResponse {
        id: post.id,
        title: post.title,
        slug: post.slug,
        content: post.content,
        excerpt: post.excerpt,
        author: author.map(|author| AuthorSummary {
            id: author.id,
            username: author.username.clone(),
            profile: profile(&author.profile),
        }),
        category: category.map(|category| CategorySummary {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }),
        tags: tags
            .into_iter()
            .map(|tag| TagSummary {
                id: tag.id,
                name: tag.name,
                slug: tag.slug,
            })
            .collect(),
        published: post.published,
        featured_image: post.featured_image,
        read_time: post.read_time,
        views: post.views,
        likes: post.likes,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}
