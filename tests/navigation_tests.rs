//! End-to-end navigation through the public API, driven headlessly with
//! `ScriptedFrontend`.

use std::cell::RefCell;
use std::rc::Rc;

use menutree::BackPolicy;
use menutree::core::surface::SurfaceLayout;
use menutree::core::{
    ArgPipeline, MenuError, MenuId, NavEvent, Navigator, NavigatorOptions, RunOutcome,
    ScriptedFrontend,
};

fn navigator(back_policy: BackPolicy) -> Navigator {
    Navigator::new(NavigatorOptions {
        layout: SurfaceLayout {
            columns: 1,
            ..SurfaceLayout::default()
        },
        back_policy,
        ..NavigatorOptions::default()
    })
    .unwrap()
}

fn replay(navigator: &mut Navigator, events: &[NavEvent]) -> ScriptedFrontend {
    let mut frontend = ScriptedFrontend::new(events.iter().copied());
    assert_eq!(navigator.run(&mut frontend).unwrap(), RunOutcome::Stopped);
    frontend
}

type Log = Rc<RefCell<Vec<String>>>;

/// Main { Item 1, Item 2, Submenu { Subitem 1..4, Submenu { Leaf } } }
fn demo_tree(navigator: &mut Navigator, log: &Log) -> (MenuId, MenuId, MenuId) {
    let main = navigator.create_menu("Main").unwrap();
    let sub = navigator.create_menu("Submenu").unwrap();
    let nested = navigator.create_menu("Nested").unwrap();

    for (menu, labels) in [
        (main, vec!["Item 1", "Item 2"]),
        (sub, vec!["Subitem 1", "Subitem 2", "Subitem 3", "Subitem 4"]),
        (nested, vec!["Leaf"]),
    ] {
        for label in labels {
            let log = log.clone();
            navigator
                .add_action(menu, label, move || log.borrow_mut().push(label.to_string()))
                .unwrap();
        }
    }
    navigator.add_submenu(main, "Submenu", sub).unwrap();
    navigator.add_submenu(sub, "Submenu", nested).unwrap();
    (main, sub, nested)
}

#[test]
fn walks_down_the_tree_and_back_up() {
    let mut navigator = navigator(BackPolicy::FirstParent);
    let log = Log::default();
    let (main, sub, nested) = demo_tree(&mut navigator, &log);
    navigator.show(main).unwrap();

    use NavEvent::*;
    let frontend = replay(
        &mut navigator,
        &[
            MoveDown, MoveDown, Select, // into Submenu
            MoveDown, MoveDown, MoveDown, MoveDown, Select, // into Nested
            Select, // Leaf
            Back, Back,
        ],
    );

    assert_eq!(*log.borrow(), vec!["Leaf"]);
    assert_eq!(navigator.current(), Some(main));
    assert!(navigator.menu(main).unwrap().is_shown());
    assert!(!navigator.menu(sub).unwrap().is_shown());
    assert!(!navigator.menu(nested).unwrap().is_shown());

    let titles: Vec<String> = frontend
        .frames()
        .iter()
        .filter_map(|f| f.title.clone())
        .collect();
    assert!(titles.contains(&"Nested".to_string()));
    assert_eq!(titles.last().map(String::as_str), Some("Main"));
}

#[test]
fn submenu_lists_back_last() {
    let mut navigator = navigator(BackPolicy::FirstParent);
    let (_, sub, _) = demo_tree(&mut navigator, &Log::default());

    let labels: Vec<String> = navigator
        .menu(sub)
        .unwrap()
        .entries()
        .map(|item| item.label.clone())
        .collect();
    assert_eq!(
        labels,
        vec!["Subitem 1", "Subitem 2", "Subitem 3", "Subitem 4", "Submenu", "Back"]
    );
}

#[test]
fn highlight_survives_items_added_while_shown() {
    let mut navigator = navigator(BackPolicy::FirstParent);
    let log = Log::default();
    let (main, _, _) = demo_tree(&mut navigator, &log);
    navigator.show(main).unwrap();
    navigator.handle_event(NavEvent::MoveDown).unwrap();

    navigator.add_action(main, "Item 3", || {}).unwrap();

    let surface = navigator.menu(main).unwrap().surface();
    assert!(surface.is_posted());
    assert_eq!(surface.current_selection(), Some(1));
    assert_eq!(surface.len(), 4);
}

#[test]
fn arguments_accumulate_down_the_tree() {
    let mut navigator = navigator(BackPolicy::FirstParent);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let shop = navigator.create_menu_with_args("Shop", ("eu".to_string(),)).unwrap();
    let cart = navigator.create_menu("Cart").unwrap();
    navigator.add_submenu_with(shop, "Cart", cart, (2u32,)).unwrap();

    let sink = seen.clone();
    navigator
        .add_action_with(
            cart,
            "Checkout",
            move |region: String, count: u32, express: bool| {
                sink.borrow_mut().push(format!("{region}:{count}:{express}"))
            },
            (true,),
        )
        .unwrap();

    navigator.show(shop).unwrap();
    replay(&mut navigator, &[NavEvent::Select, NavEvent::Select, NavEvent::Select]);

    assert_eq!(*seen.borrow(), vec!["eu:2:true", "eu:2:true"]);
    // Re-entering starts from the carried values again.
    navigator.show(shop).unwrap();
    replay(&mut navigator, &[NavEvent::Select]);
    assert_eq!(navigator.menu(cart).unwrap().pipeline().len(), 2);
}

#[test]
fn bound_arguments_must_fit_the_action() {
    let mut navigator = navigator(BackPolicy::FirstParent);
    let menu = navigator.create_menu("M").unwrap();

    let err = navigator
        .add_action_with(menu, "Bad", |_: String, _: u32| {}, ("not a u32".to_string(),))
        .unwrap_err();

    assert!(matches!(err, MenuError::TypeMismatch { .. }));
    assert_eq!(navigator.menu(menu).unwrap().item_count(), 0);
}

#[test]
fn pipeline_prepend_and_extract() {
    let mut pipeline = ArgPipeline::from_values((1u8, 2u16));
    pipeline.prepend((3u32,));

    assert_eq!(pipeline.extract::<(u32, u8, u16)>().unwrap(), (3, 1, 2));
    assert!(matches!(
        pipeline.extract::<(u8, u16, u32)>(),
        Err(MenuError::TypeMismatch { .. })
    ));
}

#[test]
fn shared_submenu_under_each_policy() {
    for (policy, expected_back) in [
        (BackPolicy::FirstParent, 0),
        (BackPolicy::Stack, 1),
    ] {
        let mut navigator = navigator(policy);
        let parents = [
            navigator.create_menu("P1").unwrap(),
            navigator.create_menu("P2").unwrap(),
        ];
        let shared = navigator.create_menu("Shared").unwrap();
        for parent in parents {
            navigator.add_submenu(parent, "Open", shared).unwrap();
        }

        navigator.show(parents[1]).unwrap();
        replay(&mut navigator, &[NavEvent::Select, NavEvent::Back]);

        assert_eq!(
            navigator.current(),
            Some(parents[expected_back]),
            "policy {}",
            policy.label()
        );
    }

    let mut navigator = navigator(BackPolicy::Exclusive);
    let p1 = navigator.create_menu("P1").unwrap();
    let p2 = navigator.create_menu("P2").unwrap();
    let shared = navigator.create_menu("Shared").unwrap();
    navigator.add_submenu(p1, "Open", shared).unwrap();
    assert!(matches!(
        navigator.add_submenu(p2, "Open", shared),
        Err(MenuError::AmbiguousBackTarget { .. })
    ));
}

#[test]
fn shared_submenu_follows_surviving_parent_after_destroy() {
    for policy in [BackPolicy::FirstParent, BackPolicy::Exclusive, BackPolicy::Stack] {
        let mut navigator = navigator(policy);
        let first = navigator.create_menu("P1").unwrap();
        let second = navigator.create_menu("P2").unwrap();
        let shared = navigator.create_menu("Shared").unwrap();
        navigator.add_submenu(first, "Open", shared).unwrap();

        navigator.destroy_menu(first).unwrap();
        navigator.add_submenu(second, "Open", shared).unwrap();

        navigator.show(second).unwrap();
        let frontend = replay(&mut navigator, &[NavEvent::Select, NavEvent::Back]);

        assert_eq!(navigator.current(), Some(second), "policy {policy}");
        assert_eq!(frontend.last_frame().unwrap().status, "", "policy {policy}");
    }
}

#[test]
fn exit_event_ends_the_loop_at_once() {
    let mut navigator = navigator(BackPolicy::FirstParent);
    let log = Log::default();
    let (main, _, _) = demo_tree(&mut navigator, &log);
    navigator.show(main).unwrap();

    let mut frontend = ScriptedFrontend::new([NavEvent::Exit, NavEvent::Select]);
    assert_eq!(navigator.run(&mut frontend).unwrap(), RunOutcome::Exit);
    assert!(log.borrow().is_empty());
}

#[test]
fn destroyed_menus_report_stale_ids() {
    let mut navigator = navigator(BackPolicy::FirstParent);
    let (main, sub, _) = demo_tree(&mut navigator, &Log::default());

    navigator.destroy_menu(sub).unwrap();

    assert_eq!(navigator.show(sub), Err(MenuError::StaleMenu(sub)));
    assert_eq!(navigator.destroy_menu(sub), Err(MenuError::StaleMenu(sub)));

    navigator.show(main).unwrap();
    let frontend = replay(&mut navigator, &[NavEvent::MoveDown, NavEvent::MoveDown, NavEvent::Select]);
    assert_eq!(navigator.current(), Some(main));
    assert!(frontend.last_frame().unwrap().status.contains("no longer exists"));
}
