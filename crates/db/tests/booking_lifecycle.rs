//! Booking conflict and cancellation behaviour against the in-memory store.

mod common;

use assert_matches::assert_matches;
use common::{at, desk_booking, now, room_booking, seeded_pool};
use officehub_core::booking::{BookingStatus, BookingType};
use officehub_core::catalog::DeskStatus;
use officehub_core::error::CoreError;
use officehub_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use officehub_db::repositories::{BookingRepo, CatalogRepo, NotificationRepo};

#[tokio::test]
async fn overlapping_desk_booking_conflicts() {
    let pool = seeded_pool().await;
    BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();

    let result =
        BookingRepo::create(&pool, &desk_booking(1, 11, at(10, 30), at(10, 45)), now()).await;
    assert_matches!(result, Err(CoreError::Conflict(_)));
}

#[tokio::test]
async fn adjacent_desk_booking_succeeds() {
    let pool = seeded_pool().await;
    BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();

    let (booking, _) =
        BookingRepo::create(&pool, &desk_booking(1, 11, at(11, 0), at(12, 0)), now())
            .await
            .unwrap();
    assert_eq!(booking.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn containing_booking_conflicts() {
    let pool = seeded_pool().await;
    BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();

    let result = BookingRepo::create(&pool, &desk_booking(1, 11, at(9, 0), at(12, 0)), now()).await;
    assert_matches!(result, Err(CoreError::Conflict(_)));
}

#[tokio::test]
async fn conflict_writes_nothing() {
    let pool = seeded_pool().await;
    BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();
    let _ = BookingRepo::create(&pool, &desk_booking(1, 11, at(10, 0), at(11, 0)), now()).await;

    assert!(BookingRepo::find_by_id(&pool, 2).await.is_none());
    assert_eq!(NotificationRepo::unread_count(&pool, 11).await, 0);
}

#[tokio::test]
async fn same_window_on_other_desk_is_free() {
    let pool = seeded_pool().await;
    BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();
    assert!(
        BookingRepo::create(&pool, &desk_booking(2, 11, at(10, 0), at(11, 0)), now())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn unknown_desk_is_not_found() {
    let pool = seeded_pool().await;
    let result = BookingRepo::create(&pool, &desk_booking(99, 10, at(10, 0), at(11, 0)), now()).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Desk", id: 99 }));
}

#[tokio::test]
async fn maintenance_desk_cannot_be_booked() {
    let pool = seeded_pool().await;
    CatalogRepo::set_desk_status(&pool, 1, DeskStatus::Maintenance)
        .await
        .unwrap();
    let result = BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now()).await;
    assert_matches!(result, Err(CoreError::Conflict(_)));
}

#[tokio::test]
async fn room_capacity_enforced() {
    let pool = seeded_pool().await;
    // Room 1 has capacity 4.
    let result = BookingRepo::create(&pool, &room_booking(1, 10, at(10, 0), at(11, 0), 5), now()).await;
    assert_matches!(result, Err(CoreError::Validation(_)));

    let (booking, _) =
        BookingRepo::create(&pool, &room_booking(1, 10, at(10, 0), at(11, 0), 4), now())
            .await
            .unwrap();
    assert_eq!(booking.booking_type, BookingType::Meeting);
    assert_eq!(booking.title.as_deref(), Some("Planning"));
}

#[tokio::test]
async fn desk_and_room_with_same_id_do_not_conflict() {
    let pool = seeded_pool().await;
    BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();
    assert!(
        BookingRepo::create(&pool, &room_booking(1, 10, at(10, 0), at(11, 0), 2), now())
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn booking_notifies_requester() {
    let pool = seeded_pool().await;
    let (_, note) = BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();
    assert_eq!(note.user_id, 10);
    assert_eq!(note.title, "Booking confirmed");
    assert!(note.message.contains("desk F1-D01"));
}

#[tokio::test]
async fn cancel_twice_is_invalid_state() {
    let pool = seeded_pool().await;
    let (booking, _) =
        BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
            .await
            .unwrap();

    let cancelled = BookingRepo::cancel(&pool, booking.id, 10, ROLE_EMPLOYEE, now())
        .await
        .unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);
    assert_eq!(cancelled.cancelled_by, Some(10));
    assert_eq!(cancelled.cancelled_at, Some(now()));

    let again = BookingRepo::cancel(&pool, booking.id, 10, ROLE_EMPLOYEE, now()).await;
    assert_matches!(again, Err(CoreError::InvalidState(_)));
}

#[tokio::test]
async fn cancel_by_stranger_forbidden_by_admin_allowed() {
    let pool = seeded_pool().await;
    let (booking, _) =
        BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
            .await
            .unwrap();

    let result = BookingRepo::cancel(&pool, booking.id, 11, ROLE_EMPLOYEE, now()).await;
    assert_matches!(result, Err(CoreError::Forbidden(_)));

    let cancelled = BookingRepo::cancel(&pool, booking.id, 1, ROLE_ADMIN, now())
        .await
        .unwrap();
    assert_eq!(cancelled.cancelled_by, Some(1));

    let notes = NotificationRepo::list_for_user(&pool, 10, false, 10, 0).await;
    assert!(notes[0].message.ends_with("by an administrator"));
}

#[tokio::test]
async fn cancel_unknown_booking_not_found() {
    let pool = seeded_pool().await;
    let result = BookingRepo::cancel(&pool, 42, 10, ROLE_EMPLOYEE, now()).await;
    assert_matches!(result, Err(CoreError::NotFound { entity: "Booking", id: 42 }));
}

#[tokio::test]
async fn cancelling_frees_only_its_own_slot() {
    let pool = seeded_pool().await;
    let (first, _) = BookingRepo::create(&pool, &desk_booking(1, 10, at(10, 0), at(11, 0)), now())
        .await
        .unwrap();
    BookingRepo::create(&pool, &desk_booking(1, 10, at(11, 0), at(12, 0)), now())
        .await
        .unwrap();

    BookingRepo::cancel(&pool, first.id, 10, ROLE_EMPLOYEE, now())
        .await
        .unwrap();

    // The cancelled slot is free again.
    assert!(
        BookingRepo::create(&pool, &desk_booking(1, 11, at(10, 0), at(11, 0)), now())
            .await
            .is_ok()
    );
    // The untouched slot still conflicts.
    let result = BookingRepo::create(&pool, &desk_booking(1, 11, at(11, 30), at(12, 30)), now()).await;
    assert_matches!(result, Err(CoreError::Conflict(_)));
}

#[tokio::test]
async fn concurrent_overlapping_requests_confirm_once() {
    let pool = seeded_pool().await;
    let mut handles = Vec::new();
    for user in 0..16 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            BookingRepo::create(&pool, &desk_booking(3, 100 + user, at(14, 0), at(15, 0)), now())
                .await
                .is_ok()
        }));
    }
    let mut confirmed = 0;
    for handle in handles {
        if handle.await.unwrap() {
            confirmed += 1;
        }
    }
    assert_eq!(confirmed, 1);
}

#[tokio::test]
async fn resource_listing_shows_confirmed_in_window() {
    let pool = seeded_pool().await;
    let (a, _) = BookingRepo::create(&pool, &desk_booking(1, 10, at(9, 0), at(10, 0)), now())
        .await
        .unwrap();
    let (b, _) = BookingRepo::create(&pool, &desk_booking(1, 10, at(13, 0), at(14, 0)), now())
        .await
        .unwrap();
    BookingRepo::cancel(&pool, b.id, 10, ROLE_EMPLOYEE, now())
        .await
        .unwrap();
    BookingRepo::create(&pool, &desk_booking(1, 10, at(18, 0), at(19, 0)), now())
        .await
        .unwrap();

    let window = officehub_core::booking::TimeRange::new(at(8, 0), at(15, 0)).unwrap();
    let listed = BookingRepo::list_for_resource(&pool, BookingType::Desk, 1, &window).await;
    assert_eq!(listed.iter().map(|b| b.id).collect::<Vec<_>>(), vec![a.id]);
}
