//! Tests for directory mutations and projections.

use super::*;
use crate::domain::user::{Role, Status, UserValidationError};
use rstest::{fixture, rstest};

fn user(id: &str, name: &str, email: &str, role: &str, status: &str) -> User {
    User::try_from_strings(id, &UserDraft::new(name, email, role, status)).expect("valid user")
}

fn id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid id")
}

fn names(users: &[User]) -> Vec<&str> {
    users.iter().map(|user| user.name().as_ref()).collect()
}

#[fixture]
fn store() -> DirectoryStore {
    DirectoryStore::with_users(vec![
        user("1", "John Doe", "john@example.com", "admin", "active"),
        user("2", "Jane Smith", "jane@example.com", "user", "active"),
        user("3", "Mike Johnson", "mike@example.com", "editor", "inactive"),
        user("4", "Sarah Wilson", "sarah@example.com", "user", "active"),
        user("5", "Tom Brown", "tom@example.com", "editor", "active"),
    ])
    .expect("unique ids")
}

#[rstest]
fn with_users_rejects_duplicate_ids() {
    let error = DirectoryStore::with_users(vec![
        user("1", "A", "a@x.com", "user", "active"),
        user("1", "B", "b@x.com", "user", "active"),
    ])
    .expect_err("duplicate id");
    assert_eq!(error, DirectoryError::DuplicateId { id: id("1") });
}

#[rstest]
fn add_appends_with_fresh_id(mut store: DirectoryStore) {
    let draft = UserDraft::new("Ann", "ann@x.com", "user", "active");

    let event = store.add(&draft).expect("valid draft");

    let DirectoryEvent::UserAdded(UserAddedEvent { user: added }) = event else {
        panic!("expected user added event");
    };
    assert_eq!(store.len(), 6);
    assert_eq!(store.users().last(), Some(&added));
    assert!(
        store
            .users()
            .iter()
            .filter(|existing| existing.id() == added.id())
            .count()
            == 1
    );
}

#[rstest]
fn add_gives_distinct_ids_to_identical_drafts() {
    let mut store = DirectoryStore::new();
    let draft = UserDraft::new("Ann", "ann@x.com", "user", "active");

    let first = store.add(&draft).expect("valid draft");
    let second = store.add(&draft).expect("valid draft");

    assert_ne!(first.user().id(), second.user().id());
}

#[rstest]
#[case::blank_name(UserDraft::new("   ", "a@x.com", "user", "active"), "name")]
#[case::bad_email(UserDraft::new("Ann", "not-an-email", "user", "active"), "email")]
#[case::no_role(UserDraft::new("Ann", "a@x.com", "", "active"), "role")]
#[case::no_status(UserDraft::new("Ann", "a@x.com", "user", ""), "status")]
fn add_rejects_invalid_drafts_without_mutation(
    mut store: DirectoryStore,
    #[case] draft: UserDraft,
    #[case] field: &str,
) {
    let before = store.clone();

    let error = store.add(&draft).expect_err("invalid draft");

    assert_eq!(error.field(), Some(field));
    assert_eq!(store, before);
}

#[rstest]
fn update_replaces_fields_and_keeps_id_and_position(mut store: DirectoryStore) {
    let target = id("3");
    let draft = UserDraft::new("Mike J", "mike.j@example.com", "admin", "active");

    let event = store.update(&target, &draft).expect("valid update");

    let DirectoryEvent::UserUpdated(UserUpdatedEvent { previous, current }) = event else {
        panic!("expected user updated event");
    };
    assert_eq!(previous.status(), Status::Inactive);
    assert_eq!(current.role(), Role::Admin);
    assert_eq!(current.id(), &target);
    assert_eq!(store.users().get(2), Some(&current));
}

#[rstest]
fn update_of_unknown_id_is_not_found(mut store: DirectoryStore) {
    let draft = UserDraft::new("Ghost", "ghost@x.com", "user", "active");

    let error = store.update(&id("99"), &draft).expect_err("unknown id");

    assert_eq!(error, DirectoryError::NotFound { id: id("99") });
}

#[rstest]
fn update_validates_before_lookup(mut store: DirectoryStore) {
    let draft = UserDraft::new("", "ghost@x.com", "user", "active");

    let error = store.update(&id("99"), &draft).expect_err("invalid draft");

    assert_eq!(
        error,
        DirectoryError::Validation(UserValidationError::EmptyName)
    );
}

#[rstest]
fn delete_removes_and_reports(mut store: DirectoryStore) {
    let event = store.delete(&id("2")).expect("user existed");

    assert_eq!(event.user().name().as_ref(), "Jane Smith");
    assert!(store.get(&id("2")).is_none());
    assert_eq!(store.len(), 4);
}

#[rstest]
fn delete_of_unknown_id_is_a_no_op(mut store: DirectoryStore) {
    let before = store.clone();
    assert!(store.delete(&id("42")).is_none());
    assert_eq!(store, before);
}

#[rstest]
fn bulk_delete_follows_input_order_and_skips_unknown(mut store: DirectoryStore) {
    let ids = [id("4"), id("42"), id("1"), id("4")];

    let events = store.bulk_delete(&ids);

    let removed: Vec<&str> = events.iter().map(|event| event.user().id().as_str()).collect();
    assert_eq!(removed, vec!["4", "1"]);
    assert!(events.iter().all(|event| matches!(
        event,
        DirectoryEvent::UserDeleted(UserDeletedEvent { bulk: true, .. })
    )));
    assert_eq!(names(store.users()), vec!["Jane Smith", "Mike Johnson", "Tom Brown"]);
}

#[rstest]
fn query_default_sorts_by_name(store: DirectoryStore) {
    let users = store.query(&UserQuery::default());
    assert_eq!(
        names(&users),
        vec!["Jane Smith", "John Doe", "Mike Johnson", "Sarah Wilson", "Tom Brown"]
    );
}

#[rstest]
fn name_sort_descending_reverses_ascending(store: DirectoryStore) {
    let ascending = store.query(&UserQuery::default().sort(SortField::Name, SortDirection::Ascending));
    let descending =
        store.query(&UserQuery::default().sort(SortField::Name, SortDirection::Descending));

    let reversed: Vec<User> = ascending.into_iter().rev().collect();
    assert_eq!(descending, reversed);
}

#[rstest]
#[case::name_fragment("JOHN", vec!["John Doe", "Mike Johnson"])]
#[case::email_fragment("sarah@", vec!["Sarah Wilson"])]
#[case::no_hits("zzz", vec![])]
fn query_searches_name_and_email_case_insensitively(
    store: DirectoryStore,
    #[case] term: &str,
    #[case] expected: Vec<&str>,
) {
    let users = store.query(&UserQuery::default().search(term));
    assert_eq!(names(&users), expected);
}

#[rstest]
fn query_combines_filters(store: DirectoryStore) {
    let users = store.query(
        &UserQuery::default()
            .role(Role::Editor)
            .status(Status::Active),
    );
    assert_eq!(names(&users), vec!["Tom Brown"]);
}

#[rstest]
fn descending_role_sort_keeps_ties_in_collection_order(store: DirectoryStore) {
    let users = store.query(&UserQuery::default().sort(SortField::Role, SortDirection::Descending));
    assert_eq!(
        names(&users),
        vec!["Jane Smith", "Sarah Wilson", "Mike Johnson", "Tom Brown", "John Doe"]
    );
}

#[rstest]
fn ascending_role_sort_keeps_ties_in_collection_order(store: DirectoryStore) {
    let users = store.query(&UserQuery::default().sort(SortField::Role, SortDirection::Ascending));
    assert_eq!(
        names(&users),
        vec!["John Doe", "Mike Johnson", "Tom Brown", "Jane Smith", "Sarah Wilson"]
    );
}

#[rstest]
fn email_sort_ignores_case() {
    let store = DirectoryStore::with_users(vec![
        user("a", "Zed", "Zed@x.com", "user", "active"),
        user("b", "amy", "amy@x.com", "user", "active"),
    ])
    .expect("unique ids");

    let users = store.query(&UserQuery::default().sort(SortField::Email, SortDirection::Ascending));

    assert_eq!(names(&users), vec!["amy", "Zed"]);
}

#[rstest]
fn query_leaves_store_untouched(store: DirectoryStore) {
    let before = store.clone();
    let _projection = store.query(&UserQuery::default().search("o"));
    assert_eq!(store, before);
}

#[rstest]
#[case("name", SortField::Name)]
#[case("email", SortField::Email)]
#[case("role", SortField::Role)]
fn sort_field_parses(#[case] raw: &str, #[case] expected: SortField) {
    assert_eq!(raw.parse::<SortField>(), Ok(expected));
}

#[rstest]
fn sort_direction_rejects_unknown_input() {
    let error = "sideways".parse::<SortDirection>().expect_err("unknown direction");
    assert_eq!(error.to_string(), "unknown sort direction: sideways");
}
