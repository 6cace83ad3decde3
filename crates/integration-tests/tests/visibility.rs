//! Ticket visibility against a real database.
//!
//! Requires a `PostgreSQL` database at `HELPDESK_TEST_DATABASE_URL`.
//! Run with: cargo test -p helpdesk-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use helpdesk_core::{Role, TicketId, TicketScope};
use helpdesk_integration_tests::{connect, create_ticket, create_user};
use helpdesk_web::db::{TicketRepository, UserRepository};
use helpdesk_web::models::TicketListItem;

fn ids(tickets: &[TicketListItem]) -> HashSet<TicketId> {
    tickets.iter().map(|t| t.id).collect()
}

fn assert_newest_first(tickets: &[TicketListItem]) {
    for pair in tickets.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.created_at, a.id) > (b.created_at, b.id),
            "ticket {} listed before {}",
            a.id,
            b.id
        );
    }
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_user_sees_only_own_tickets() {
    let pool = connect().await;
    let alice = create_user(&pool, "Alice", Role::User).await;
    let bob = create_user(&pool, "Bob", Role::User).await;

    let (first, _) = create_ticket(&pool, alice.id, None).await;
    let (second, _) = create_ticket(&pool, alice.id, Some(bob.id)).await;
    let (bobs, _) = create_ticket(&pool, bob.id, None).await;

    let visible = TicketRepository::new(&pool)
        .list_visible(TicketScope::CreatedBy(alice.id))
        .await
        .unwrap();

    assert!(visible.iter().all(|t| t.created_by == alice.id));
    assert_eq!(ids(&visible), HashSet::from([first, second]));
    assert!(!ids(&visible).contains(&bobs));
    assert_newest_first(&visible);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_agent_sees_assigned_and_unassigned() {
    let pool = connect().await;
    let agent = create_user(&pool, "Agnes", Role::Agent).await;
    let other_agent = create_user(&pool, "Otto", Role::Agent).await;
    let user = create_user(&pool, "Uma", Role::User).await;

    let (mine, _) = create_ticket(&pool, user.id, Some(agent.id)).await;
    let (theirs, _) = create_ticket(&pool, user.id, Some(other_agent.id)).await;
    let (open, _) = create_ticket(&pool, user.id, None).await;

    let scope = TicketScope::AssignedOrUnassigned(agent.id);
    let visible = TicketRepository::new(&pool)
        .list_visible(scope)
        .await
        .unwrap();

    assert!(
        visible
            .iter()
            .all(|t| t.assigned_to.is_none() || t.assigned_to == Some(agent.id))
    );
    assert!(visible.iter().all(|t| scope.permits(&t.ownership())));

    let seen = ids(&visible);
    assert!(seen.contains(&mine));
    assert!(seen.contains(&open));
    assert!(!seen.contains(&theirs));
    assert_newest_first(&visible);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_admin_sees_everything_with_names() {
    let pool = connect().await;
    let agent = create_user(&pool, "Agnes", Role::Agent).await;
    let user = create_user(&pool, "Uma", Role::User).await;

    let (assigned, _) = create_ticket(&pool, user.id, Some(agent.id)).await;
    let (open, _) = create_ticket(&pool, user.id, None).await;

    let visible = TicketRepository::new(&pool)
        .list_visible(TicketScope::All)
        .await
        .unwrap();
    assert_newest_first(&visible);

    let assigned = visible.iter().find(|t| t.id == assigned).unwrap();
    assert_eq!(assigned.created_by_name, "Uma");
    assert_eq!(assigned.assigned_to_name.as_deref(), Some("Agnes"));

    let open = visible.iter().find(|t| t.id == open).unwrap();
    assert_eq!(open.created_by_name, "Uma");
    assert_eq!(open.assigned_to_name, None);
    assert_eq!(open.status, "OPEN");
    assert_eq!(open.priority, None);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (HELPDESK_TEST_DATABASE_URL)"]
async fn test_unrecognised_stored_role_gets_user_scope() {
    let pool = connect().await;
    let odd = create_user(&pool, "Odd", Role::Admin).await;
    let other = create_user(&pool, "Other", Role::User).await;
    let users = UserRepository::new(&pool);
    users.set_role(odd.id, "SUPERVISOR").await.unwrap();

    let (own, _) = create_ticket(&pool, odd.id, None).await;
    let (foreign, _) = create_ticket(&pool, other.id, None).await;

    let stored = users.get_by_id(odd.id).await.unwrap().unwrap();
    assert_eq!(stored.role, "SUPERVISOR");

    let scope = TicketScope::for_stored_role(stored.id, &stored.role);
    assert_eq!(scope, TicketScope::CreatedBy(odd.id));

    let visible = TicketRepository::new(&pool)
        .list_visible(scope)
        .await
        .unwrap();
    assert_eq!(ids(&visible), HashSet::from([own]));
    assert!(!ids(&visible).contains(&foreign));
}
