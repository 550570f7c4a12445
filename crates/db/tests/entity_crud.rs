//! Integration tests for the repository layer against a real database:
//! project and progress-log CRUD, row-level ownership predicates, tag
//! array round-trips, and cascade delete behaviour.

use codeprogress_db::models::progress_log::CreateProgressLog;
use codeprogress_db::models::project::{CreateProject, UpdateProject};
use codeprogress_db::models::user::CreateUser;
use codeprogress_db::repositories::{ProfileRepo, ProgressLogRepo, ProjectRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a confirmed user with a profile, directly in the database.
async fn seed_user(pool: &PgPool, email: &str, name: &str) -> i64 {
    let input = CreateUser {
        email: email.to_string(),
        password_hash: "$argon2id$test-hash".to_string(),
        full_name: Some(name.to_string()),
        confirmation_token_hash: "unused".to_string(),
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    ProfileRepo::ensure(pool, user.id, name)
        .await
        .expect("profile ensure should succeed");
    user.id
}

fn new_project(user_id: i64, title: &str, tags: &[&str]) -> CreateProject {
    CreateProject {
        title: title.to_string(),
        user_id,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        github_url: None,
        project_url: None,
    }
}

// ---------------------------------------------------------------------------
// Project CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_list_projects(pool: PgPool) {
    let owner = seed_user(&pool, "alice@test.com", "Alice").await;

    let first = ProjectRepo::create(&pool, &new_project(owner, "First", &["rust"]))
        .await
        .expect("create should succeed");
    let second = ProjectRepo::create(&pool, &new_project(owner, "Second", &["rust", "cli"]))
        .await
        .expect("create should succeed");

    assert_eq!(first.tags, vec!["rust"]);
    assert_eq!(second.tags, vec!["rust", "cli"]);

    let listed = ProjectRepo::list_with_owner(&pool)
        .await
        .expect("list should succeed");
    assert_eq!(listed.len(), 2);
    // Newest first.
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
    assert_eq!(listed[0].owner_name, "Alice");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_owner_name_falls_back_without_profile(pool: PgPool) {
    let input = CreateUser {
        email: "noprofile@test.com".to_string(),
        password_hash: "$argon2id$test-hash".to_string(),
        full_name: None,
        confirmation_token_hash: "unused".to_string(),
    };
    let user = UserRepo::create(&pool, &input)
        .await
        .expect("user creation should succeed");

    let project = ProjectRepo::create(&pool, &new_project(user.id, "Orphan", &[]))
        .await
        .expect("create should succeed");

    let fetched = ProjectRepo::find_with_owner(&pool, project.id)
        .await
        .expect("find should succeed")
        .expect("project should exist");
    assert_eq!(fetched.owner_name, "Anonymous");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_requires_ownership(pool: PgPool) {
    let owner = seed_user(&pool, "owner@test.com", "Owner").await;
    let intruder = seed_user(&pool, "intruder@test.com", "Intruder").await;

    let project = ProjectRepo::create(&pool, &new_project(owner, "Mine", &[]))
        .await
        .expect("create should succeed");

    let input = UpdateProject {
        title: "Hijacked".to_string(),
        tags: vec![],
        github_url: None,
        project_url: None,
    };

    // The non-owner's statement matches no row.
    let denied = ProjectRepo::update(&pool, project.id, intruder, &input)
        .await
        .expect("query should succeed");
    assert!(denied.is_none(), "non-owner update must not match any row");

    let untouched = ProjectRepo::find_by_id(&pool, project.id)
        .await
        .expect("find should succeed")
        .expect("project should exist");
    assert_eq!(untouched.title, "Mine");

    // The owner's statement succeeds.
    let updated = ProjectRepo::update(&pool, project.id, owner, &input)
        .await
        .expect("query should succeed")
        .expect("owner update should match");
    assert_eq!(updated.title, "Hijacked");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_requires_ownership_and_cascades(pool: PgPool) {
    let owner = seed_user(&pool, "owner@test.com", "Owner").await;
    let intruder = seed_user(&pool, "intruder@test.com", "Intruder").await;

    let project = ProjectRepo::create(&pool, &new_project(owner, "Mine", &[]))
        .await
        .expect("create should succeed");
    let log = ProgressLogRepo::create(
        &pool,
        &CreateProgressLog {
            project_id: project.id,
            user_id: owner,
            content: "day 1".to_string(),
        },
    )
    .await
    .expect("log creation should succeed");

    assert!(
        !ProjectRepo::delete(&pool, project.id, intruder)
            .await
            .expect("query should succeed"),
        "non-owner delete must remove nothing"
    );

    assert!(ProjectRepo::delete(&pool, project.id, owner)
        .await
        .expect("query should succeed"));

    // The project's logs went with it.
    let orphan = ProgressLogRepo::find_by_id(&pool, log.id)
        .await
        .expect("find should succeed");
    assert!(orphan.is_none(), "logs must cascade with their project");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_ids_by_owner(pool: PgPool) {
    let alice = seed_user(&pool, "alice@test.com", "Alice").await;
    let bob = seed_user(&pool, "bob@test.com", "Bob").await;

    let mine = ProjectRepo::create(&pool, &new_project(alice, "Mine", &[]))
        .await
        .expect("create should succeed");
    ProjectRepo::create(&pool, &new_project(bob, "Theirs", &[]))
        .await
        .expect("create should succeed");

    let ids = ProjectRepo::list_ids_by_owner(&pool, alice)
        .await
        .expect("list should succeed");
    assert_eq!(ids, vec![mine.id]);

    let none = ProjectRepo::list_ids_by_owner(&pool, 999_999)
        .await
        .expect("list should succeed");
    assert!(none.is_empty());
}

// ---------------------------------------------------------------------------
// Progress log CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_log_listing_is_newest_first_with_author(pool: PgPool) {
    let owner = seed_user(&pool, "owner@test.com", "Owner").await;
    let project = ProjectRepo::create(&pool, &new_project(owner, "Tracker", &[]))
        .await
        .expect("create should succeed");

    for content in ["day 1", "day 2", "day 3"] {
        ProgressLogRepo::create(
            &pool,
            &CreateProgressLog {
                project_id: project.id,
                user_id: owner,
                content: content.to_string(),
            },
        )
        .await
        .expect("log creation should succeed");
    }

    let logs = ProgressLogRepo::list_by_project(&pool, project.id)
        .await
        .expect("list should succeed");
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0].content, "day 3");
    assert_eq!(logs[2].content, "day 1");
    assert!(logs.iter().all(|l| l.author_name == "Owner"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_log_mutations_require_authorship(pool: PgPool) {
    let author = seed_user(&pool, "author@test.com", "Author").await;
    let other = seed_user(&pool, "other@test.com", "Other").await;
    let project = ProjectRepo::create(&pool, &new_project(author, "Tracker", &[]))
        .await
        .expect("create should succeed");

    let log = ProgressLogRepo::create(
        &pool,
        &CreateProgressLog {
            project_id: project.id,
            user_id: author,
            content: "original".to_string(),
        },
    )
    .await
    .expect("log creation should succeed");

    let denied = ProgressLogRepo::update(&pool, log.id, other, "tampered")
        .await
        .expect("query should succeed");
    assert!(denied.is_none());

    assert!(
        !ProgressLogRepo::delete(&pool, log.id, other)
            .await
            .expect("query should succeed"),
        "non-author delete must remove nothing"
    );

    let updated = ProgressLogRepo::update(&pool, log.id, author, "revised")
        .await
        .expect("query should succeed")
        .expect("author update should match");
    assert_eq!(updated.content, "revised");

    assert!(ProgressLogRepo::delete(&pool, log.id, author)
        .await
        .expect("query should succeed"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_for_projects_joins_titles(pool: PgPool) {
    let owner = seed_user(&pool, "owner@test.com", "Owner").await;
    let tracker = ProjectRepo::create(&pool, &new_project(owner, "Tracker", &[]))
        .await
        .expect("create should succeed");
    let compiler = ProjectRepo::create(&pool, &new_project(owner, "Compiler", &[]))
        .await
        .expect("create should succeed");

    for (project_id, content) in [(tracker.id, "t1"), (compiler.id, "c1"), (tracker.id, "t2")] {
        ProgressLogRepo::create(
            &pool,
            &CreateProgressLog {
                project_id,
                user_id: owner,
                content: content.to_string(),
            },
        )
        .await
        .expect("log creation should succeed");
    }

    let all = ProgressLogRepo::list_for_projects(&pool, &[tracker.id, compiler.id])
        .await
        .expect("list should succeed");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].content, "t2");
    assert_eq!(all[0].project_title, "Tracker");
    assert!(all.iter().any(|l| l.project_title == "Compiler"));

    let scoped = ProgressLogRepo::list_for_projects(&pool, &[compiler.id])
        .await
        .expect("list should succeed");
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].content, "c1");
}
