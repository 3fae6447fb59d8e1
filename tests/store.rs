use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use todo_desk::{
    db::dao::{DaoContext, DaoLayerError, DaoResult, NewList, NewTask},
    db::entities::{membership, prelude::Membership},
    test_helpers::{file_db, memory_db},
};

async fn store() -> (DatabaseConnection, DaoContext) {
    let db = memory_db().await;
    let daos = DaoContext::new(&db);
    (db, daos)
}

async fn add_list(daos: &DaoContext, name: &str) -> i32 {
    daos.list()
        .create_list(NewList {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("create list")
        .id
}

async fn add_task(daos: &DaoContext, name: &str) -> i32 {
    daos.task()
        .create_task(NewTask {
            name: name.to_string(),
            ..Default::default()
        })
        .await
        .expect("create task")
        .id
}

async fn links_of_list(db: &DatabaseConnection, list_id: i32) -> u64 {
    Membership::find()
        .filter(membership::Column::ListId.eq(list_id))
        .count(db)
        .await
        .expect("count memberships")
}

#[tokio::test]
async fn identifiers_start_at_one_and_are_never_reissued() {
    let (_db, daos) = store().await;

    let first = add_list(&daos, "One").await;
    let second = add_list(&daos, "Two").await;
    let third = add_list(&daos, "Three").await;
    assert_eq!((first, second, third), (1, 2, 3));
    assert_eq!(add_task(&daos, "First task").await, 1);
    let link = daos.membership().link(1, first).await.expect("link");
    assert_eq!(link.id, 1);

    daos.list().delete_list(second).await.expect("delete middle list");
    let fourth = add_list(&daos, "Four").await;
    assert_eq!(fourth, 4);

    daos.list().delete_list(fourth).await.expect("delete newest list");
    assert_eq!(add_list(&daos, "Five").await, 5);
}

/// Even `n` creates a list, odd `n` creates a task and links it to `keep`.
async fn write_one(daos: &DaoContext, n: u32, keep: i32) -> DaoResult<(&'static str, i32)> {
    if n % 2 == 0 {
        let list = daos
            .list()
            .create_list(NewList {
                name: format!("list {n}"),
                ..Default::default()
            })
            .await?;
        return Ok(("lists", list.id));
    }
    let task = daos
        .task()
        .create_task(NewTask {
            name: format!("task {n}"),
            ..Default::default()
        })
        .await?;
    daos.membership().link(task.id, keep).await?;
    Ok(("tasks", task.id))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writes_on_a_pooled_file_store() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db = file_db(&dir.path().join("todo.db")).await;
    let daos = DaoContext::new(&db);

    let keep = add_list(&daos, "Keep").await;
    let doomed = add_list(&daos, "Doomed").await;
    for n in 0..5 {
        let task = add_task(&daos, &format!("doomed {n}")).await;
        daos.membership().link(task, doomed).await.expect("link");
    }

    let writers: Vec<_> = (0..40u32)
        .map(|n| {
            let daos = daos.clone();
            tokio::spawn(async move { write_one(&daos, n, keep).await })
        })
        .collect();
    let cascade = {
        let daos = daos.clone();
        tokio::spawn(async move { daos.list().delete_list(doomed).await })
    };

    let mut list_ids = vec![keep];
    let mut task_ids = Vec::new();
    for writer in writers {
        let (table, id) = writer
            .await
            .expect("join writer")
            .expect("concurrent write should succeed");
        match table {
            "lists" => list_ids.push(id),
            _ => task_ids.push(id),
        }
    }
    let outcome = cascade
        .await
        .expect("join cascade")
        .expect("cascade should succeed");
    assert_eq!(outcome.deleted_tasks.len(), 5);
    assert!(outcome.preserved_tasks.is_empty());

    let distinct = |ids: &mut Vec<i32>| {
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        before == ids.len()
    };
    assert!(distinct(&mut list_ids), "list ids collided: {list_ids:?}");
    assert!(distinct(&mut task_ids), "task ids collided: {task_ids:?}");
    assert_eq!(task_ids.len(), 20);
    assert!(!list_ids.contains(&doomed));

    assert_eq!(daos.list().count_visible().await.expect("count lists"), 21);
    let kept = daos.task().tasks_by_list(keep).await.expect("tasks by list");
    assert_eq!(kept.iter().map(|task| task.id).collect::<Vec<_>>(), task_ids);
    assert_eq!(links_of_list(&db, doomed).await, 0);
}

#[tokio::test]
async fn new_rows_get_defaults() {
    let (_db, daos) = store().await;

    let list_id = add_list(&daos, "X").await;
    let list = daos
        .list()
        .find_list(list_id)
        .await
        .expect("find list")
        .expect("list exists");
    assert_eq!(list.name, "X");
    assert!(!list.hidden);
    assert!(list.description.is_none());

    let task_id = add_task(&daos, "Water plants").await;
    let task = daos
        .task()
        .find_task(task_id)
        .await
        .expect("find task")
        .expect("task exists");
    assert!(!task.notify && !task.completed && !task.hidden);
    assert_eq!(task.importance, 0);
    assert!(task.end_date.is_none());
}

#[tokio::test]
async fn hidden_rows_are_filtered_from_listings() {
    let (_db, daos) = store().await;

    let visible = add_list(&daos, "Visible").await;
    daos.list()
        .create_list(NewList {
            name: "Archived".to_string(),
            hidden: true,
            ..Default::default()
        })
        .await
        .expect("create hidden list");

    let shown = add_task(&daos, "Shown").await;
    let hidden = daos
        .task()
        .create_task(NewTask {
            name: "Hidden".to_string(),
            hidden: Some(true),
            ..Default::default()
        })
        .await
        .expect("create hidden task")
        .id;
    daos.membership().link(shown, visible).await.expect("link shown");
    daos.membership().link(hidden, visible).await.expect("link hidden");

    let lists = daos.list().list_visible().await.expect("list lists");
    assert_eq!(lists.iter().map(|list| list.id).collect::<Vec<_>>(), vec![visible]);
    assert_eq!(daos.list().count_visible().await.expect("count lists"), 1);

    let tasks = daos.task().tasks_by_list(visible).await.expect("tasks by list");
    assert_eq!(tasks.iter().map(|task| task.id).collect::<Vec<_>>(), vec![shown]);
}

#[tokio::test]
async fn cascade_deletes_exclusive_tasks_and_keeps_shared_ones() {
    let (db, daos) = store().await;

    let list_a = add_list(&daos, "A").await;
    let list_b = add_list(&daos, "B").await;
    let only_a = add_task(&daos, "Only A").await;
    let shared = add_task(&daos, "Shared").await;
    daos.membership().link(only_a, list_a).await.expect("link");
    daos.membership().link(shared, list_a).await.expect("link");
    daos.membership().link(shared, list_b).await.expect("link");

    let outcome = daos.list().delete_list(list_a).await.expect("delete list");

    assert_eq!(outcome.deleted_tasks, vec![only_a]);
    assert_eq!(outcome.preserved_tasks, vec![shared]);
    assert_eq!(outcome.removed_links, 2);

    assert!(daos.task().find_task(only_a).await.expect("find").is_none());
    assert!(daos.task().find_task(shared).await.expect("find").is_some());
    assert!(daos.list().find_list(list_a).await.expect("find").is_none());
    assert_eq!(links_of_list(&db, list_a).await, 0);
    assert_eq!(
        daos.membership().list_ids_for_task(shared).await.expect("links"),
        vec![list_b]
    );
}

#[tokio::test]
async fn deleting_an_empty_list_leaves_others_alone() {
    let (db, daos) = store().await;

    let empty = add_list(&daos, "Empty").await;
    let other = add_list(&daos, "Other").await;
    let task = add_task(&daos, "Kept").await;
    daos.membership().link(task, other).await.expect("link");

    let outcome = daos.list().delete_list(empty).await.expect("delete empty list");
    assert!(outcome.deleted_tasks.is_empty());
    assert_eq!(outcome.removed_links, 0);

    assert!(daos.list().find_list(other).await.expect("find").is_some());
    assert!(daos.task().find_task(task).await.expect("find").is_some());
    assert_eq!(links_of_list(&db, other).await, 1);
}

#[tokio::test]
async fn deleting_a_missing_list_changes_nothing() {
    let (db, daos) = store().await;

    let list = add_list(&daos, "Real").await;
    let task = add_task(&daos, "Linked").await;
    daos.membership().link(task, list).await.expect("link");

    let err = daos.list().delete_list(list + 100).await.expect_err("missing list");
    assert!(matches!(err, DaoLayerError::NotFound { entity: "lists", .. }));
    assert_eq!(links_of_list(&db, list).await, 1);
    assert!(daos.task().find_task(task).await.expect("find").is_some());
}

#[tokio::test]
async fn task_deletion_removes_every_link() {
    let (db, daos) = store().await;

    let lists = [
        add_list(&daos, "A").await,
        add_list(&daos, "B").await,
        add_list(&daos, "C").await,
    ];
    let task = add_task(&daos, "Everywhere").await;
    for list in lists {
        daos.membership().link(task, list).await.expect("link");
    }

    let removed = daos.task().delete_task(task).await.expect("delete task");
    assert_eq!(removed, 3);
    assert!(daos.task().find_task(task).await.expect("find").is_none());
    for list in lists {
        assert_eq!(links_of_list(&db, list).await, 0);
        assert!(daos.list().find_list(list).await.expect("find").is_some());
    }

    let err = daos.task().delete_task(task).await.expect_err("already deleted");
    assert!(matches!(err, DaoLayerError::NotFound { entity: "tasks", .. }));
}

#[tokio::test]
async fn links_are_validated_and_unique() {
    let (_db, daos) = store().await;

    let list = add_list(&daos, "A").await;
    let task = add_task(&daos, "T").await;

    let err = daos.membership().link(task + 1, list).await.expect_err("missing task");
    assert!(matches!(err, DaoLayerError::NotFound { entity: "tasks", .. }));
    let err = daos.membership().link(task, list + 1).await.expect_err("missing list");
    assert!(matches!(err, DaoLayerError::NotFound { entity: "lists", .. }));

    let link = daos.membership().link(task, list).await.expect("first link");
    assert_eq!(link.id, 1);
    let err = daos.membership().link(task, list).await.expect_err("second link");
    assert!(matches!(err, DaoLayerError::AlreadyLinked { .. }));

    daos.membership().unlink(task, list).await.expect("unlink");
    let err = daos.membership().unlink(task, list).await.expect_err("unlink twice");
    assert!(matches!(err, DaoLayerError::NotLinked { .. }));
    assert!(daos.task().find_task(task).await.expect("find").is_some());
}

#[tokio::test]
async fn tasks_of_a_missing_list_is_not_found() {
    let (_db, daos) = store().await;

    let err = daos.task().tasks_by_list(42).await.expect_err("missing list");
    assert!(matches!(err, DaoLayerError::NotFound { entity: "lists", id: 42 }));
}
