// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for volunteer and merchant participation and the re-evaluation hooks.

use crate::{CoreError, FixedClock, StatusEngine};
use gleaner_domain::{DomainError, EventId, EventStatus, EventType, MerchantId, VolunteerId};

use super::helpers::{
    BEFORE_START, RacingStore, create_event, create_test_admin, create_test_engine,
    create_test_merchant_actor, create_test_new_event, create_test_volunteer_actor,
    history_reasons,
};

#[test]
fn test_registration_that_fills_market_makes_it_ready() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Market, 2);

    let first = engine
        .register_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1))
        .unwrap();
    let second = engine
        .register_volunteer(id, VolunteerId::new(2), &create_test_volunteer_actor(2))
        .unwrap();

    assert_eq!(first.status, EventStatus::Incomplete);
    assert_eq!(first.status_history.len(), 1);
    assert_eq!(second.status, EventStatus::Ready);
    assert_eq!(history_reasons(&second), vec!["initial", "enough volunteers"]);
    assert_eq!(
        second.status_history.last().unwrap().changed_by,
        Some(create_test_volunteer_actor(2))
    );
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Market, 2);
    engine
        .register_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1))
        .unwrap();

    let result =
        engine.register_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::VolunteerAlreadyRegistered { .. }
        ))
    ));
    assert_eq!(engine.get_event(id).unwrap().volunteers.len(), 1);
}

#[test]
fn test_registration_for_missing_event_is_not_found() {
    let mut engine = create_test_engine();

    let result =
        engine.register_volunteer(EventId::new(7), VolunteerId::new(1), &create_test_admin());

    assert_eq!(result.unwrap_err(), CoreError::NotFound(EventId::new(7)));
}

#[test]
fn test_registration_into_cancelled_event_is_rejected() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Market, 2);
    engine
        .change_status(id, "cancelled", &create_test_admin(), None)
        .unwrap();

    let result =
        engine.register_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EventClosed {
            status: EventStatus::Cancelled,
            ..
        }))
    ));
}

#[test]
fn test_unregistration_drops_ready_event_to_incomplete() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Market, 1);
    engine
        .register_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1))
        .unwrap();

    let event = engine
        .unregister_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1))
        .unwrap();

    assert_eq!(event.status, EventStatus::Incomplete);
    assert!(event.volunteers.is_empty());
    assert_eq!(
        history_reasons(&event),
        vec!["initial", "enough volunteers", "insufficient volunteers"]
    );
}

#[test]
fn test_unregistering_unknown_volunteer_is_rejected() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Market, 1);

    let result =
        engine.unregister_volunteer(id, VolunteerId::new(5), &create_test_volunteer_actor(5));

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::VolunteerNotRegistered { .. }
        ))
    ));
}

#[test]
fn test_merchant_donation_completes_collection() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Collection, 1);
    let staffed = engine
        .register_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1))
        .unwrap();

    let event = engine
        .attach_merchant_donation(
            id,
            MerchantId::new(3),
            Some("40 kg of bread"),
            &create_test_merchant_actor(3),
        )
        .unwrap();

    assert_eq!(staffed.status, EventStatus::Incomplete);
    assert_eq!(
        staffed.status_history.len(),
        1,
        "no merchant yet, status unchanged"
    );
    assert_eq!(event.status, EventStatus::Ready);
    assert_eq!(
        event.status_history.last().unwrap().reason,
        "enough volunteers and at least one merchant"
    );
    assert_eq!(
        engine.store().donation_note(id, MerchantId::new(3)),
        Some("40 kg of bread")
    );
}

#[test]
fn test_repeat_donation_is_idempotent_for_merchants() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Collection, 1);
    let merchant = create_test_merchant_actor(3);
    let first = engine
        .attach_merchant_donation(id, MerchantId::new(3), Some("bread"), &merchant)
        .unwrap();

    let second = engine
        .attach_merchant_donation(id, MerchantId::new(3), Some("more bread"), &merchant)
        .unwrap();

    assert_eq!(second.merchants.len(), 1);
    assert_eq!(second.version, first.version);
    assert_eq!(
        engine.store().donation_note(id, MerchantId::new(3)),
        Some("bread")
    );
}

#[test]
fn test_donation_to_finished_event_is_rejected() {
    let mut engine = create_test_engine();
    let id = create_event(&mut engine, EventType::Collection, 1);
    engine.clock_mut().set(super::helpers::EVENT_END);
    engine
        .change_status(id, "finished", &create_test_admin(), None)
        .unwrap();

    let merchant = create_test_merchant_actor(1);
    let result = engine.attach_merchant_donation(id, MerchantId::new(1), None, &merchant);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EventClosed { .. }))
    ));
}

#[test]
fn test_failed_re_evaluation_does_not_fail_registration() {
    let mut engine = StatusEngine::new(RacingStore::default(), FixedClock::new(BEFORE_START));
    let id = engine
        .create_event(
            create_test_new_event(EventType::Market, 1),
            &create_test_admin(),
        )
        .unwrap()
        .id;

    let event = engine
        .register_volunteer(id, VolunteerId::new(1), &create_test_volunteer_actor(1))
        .unwrap();

    assert!(event.volunteers.contains(&VolunteerId::new(1)));
    assert_eq!(event.status, EventStatus::Incomplete);
    assert_eq!(event.status_history.len(), 1);
}
