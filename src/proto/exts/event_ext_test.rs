use prost::Name;

use crate::proto::event::Any;
use crate::proto::event::EvaluationEvent;
use crate::proto::event::GoalEvent;
use crate::proto::exts::AnyExt;

#[test]
fn test_pack_sets_type_url_and_unpacks() {
    let goal = GoalEvent {
        goal_id: "goal".to_string(),
        value: 1.5,
        ..Default::default()
    };
    let any = Any::pack(&goal);

    assert_eq!(any.type_url, "type.googleapis.com/gateway.event.GoalEvent");
    assert!(any.is::<GoalEvent>());
    assert!(!any.is::<EvaluationEvent>());
    assert_eq!(any.unpack::<GoalEvent>().unwrap(), goal);
}

#[test]
fn test_type_name_accepts_url_without_prefix() {
    let any = Any {
        type_url: EvaluationEvent::full_name(),
        value: vec![],
    };
    assert_eq!(any.type_name(), "gateway.event.EvaluationEvent");
    assert!(any.is::<EvaluationEvent>());
}

#[test]
fn test_unpack_rejects_garbage() {
    let any = Any {
        type_url: GoalEvent::type_url(),
        value: vec![0xff, 0xff, 0xff],
    };
    assert!(any.unpack::<GoalEvent>().is_err());
}
