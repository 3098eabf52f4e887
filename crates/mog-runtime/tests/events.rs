#![forbid(unsafe_code)]

//! Event pipeline behaviour as seen through a model.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use mog_core::HostTree;
use mog_dom::{Element, MemoryTree};
use mog_runtime::{Dispatch, Model, Value};
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Rejected;

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rejected")
    }
}

impl std::error::Error for Rejected {}

fn user() -> (Rc<MemoryTree>, Model) {
    let tree = Rc::new(MemoryTree::new());
    let model = Model::new("user", Rc::clone(&tree) as Rc<dyn HostTree>);
    (tree, model)
}

fn recorder() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

#[test]
fn handlers_run_last_registered_first() {
    let (_tree, model) = user();
    let log = recorder();
    for tag in ["h1", "h2", "h3"] {
        let log = Rc::clone(&log);
        model.on("ping", move |_, _| {
            log.borrow_mut().push(tag.to_owned());
            Ok(())
        });
    }

    let outcome = model.trigger("ping", None);
    assert_eq!(*log.borrow(), vec!["h3", "h2", "h1"]);
    assert_eq!(outcome, Dispatch { invoked: 3, failed: 0 });
}

#[test]
fn comma_list_registers_each_name() {
    let (_tree, model) = user();
    let log = recorder();
    let l = Rc::clone(&log);
    model.on("a, b ,c", move |_, value| {
        l.borrow_mut()
            .push(value.map_or("-", Value::display_text).to_owned());
        Ok(())
    });

    model.trigger("a", Some(&Value::text("1")));
    model.trigger("b", None);
    model.trigger("c", Some(&Value::Null));
    assert_eq!(*log.borrow(), vec!["1", "-", ""]);
    assert!(model.has_listeners("b"));
    assert!(!model.has_listeners("a, b ,c"));
}

#[test]
fn trigger_without_handlers_is_a_no_op() {
    let (_tree, model) = user();
    assert_eq!(model.trigger("nothing", None), Dispatch::default());
}

#[test]
fn failing_handler_does_not_stop_the_rest() {
    let (_tree, model) = user();
    let log = recorder();
    let l = Rc::clone(&log);
    model.on("user.set.name", move |_, _| {
        l.borrow_mut().push("survivor".into());
        Ok(())
    });
    model.on("user.set.name", |_, _| Err(Rejected.into()));

    let outcome = model.trigger("user.set.name", None);
    assert_eq!(outcome, Dispatch { invoked: 2, failed: 1 });
    assert_eq!(*log.borrow(), vec!["survivor"]);
}

#[test]
fn set_event_carries_the_new_value() {
    let (_tree, model) = user();
    let log = recorder();
    let l = Rc::clone(&log);
    model.on(&model.set_event_name("email"), move |m, value| {
        let stored = m.get("email");
        l.borrow_mut().push(format!(
            "{}={}",
            value.map_or("?", Value::display_text),
            stored.as_ref().map_or("?", Value::display_text)
        ));
        Ok(())
    });

    model.set([("email", "a@b.com")]);
    assert_eq!(*log.borrow(), vec!["a@b.com=a@b.com"]);
}

#[test]
fn user_edit_triggers_set_event() {
    let (tree, model) = user();
    let field = tree.append(Element::text_input().attr("data-mog-input", "user[name]"));
    model.sync().unwrap();

    let log = recorder();
    let l = Rc::clone(&log);
    model.on("user.set.name", move |_, value| {
        l.borrow_mut()
            .push(value.map_or("", Value::display_text).to_owned());
        Ok(())
    });

    tree.type_text(field, "A");
    tree.type_text(field, "Ad");
    assert_eq!(*log.borrow(), vec!["A", "Ad"]);
}

#[test]
fn sync_and_pull_are_silent() {
    let (tree, model) = user();
    tree.append(
        Element::text_input()
            .attr("data-mog-input", "user[name]")
            .value("Ada"),
    );
    let log = recorder();
    let l = Rc::clone(&log);
    model.on("user.set.name", move |_, _| {
        l.borrow_mut().push("fired".into());
        Ok(())
    });

    model.sync().unwrap();
    model.pull();
    model.push(None);
    assert!(log.borrow().is_empty());
    assert_eq!(model.get("name").unwrap(), "Ada");
}

#[test]
fn handler_registered_during_dispatch_waits_for_next_trigger() {
    let (_tree, model) = user();
    let log = recorder();
    let l = Rc::clone(&log);
    model.on("tick", move |m, _| {
        let inner = Rc::clone(&l);
        l.borrow_mut().push("outer".into());
        m.on("tick", move |_, _| {
            inner.borrow_mut().push("late".into());
            Ok(())
        });
        Ok(())
    });

    model.trigger("tick", None);
    assert_eq!(*log.borrow(), vec!["outer"]);

    log.borrow_mut().clear();
    model.trigger("tick", None);
    assert_eq!(*log.borrow(), vec!["late", "outer"]);
}

#[test]
fn handler_can_derive_another_property() {
    let (tree, model) = user();
    let first = tree.append(Element::text_input().attr("data-mog-input", "user[first]"));
    let greeting = tree.append(Element::span().attr("data-mog-output", "user[greeting]"));
    model.sync().unwrap();
    model.on("user.set.first", |m, value| {
        let name = value.map_or("", Value::display_text);
        m.set([("greeting", format!("Hello, {name}!"))]);
        Ok(())
    });

    tree.type_text(first, "Ada");
    assert_eq!(tree.text_of(greeting), "Hello, Ada!");
    assert_eq!(model.get("greeting").unwrap(), "Hello, Ada!");
}

#[test]
fn suppressed_set_is_silent() {
    let (_tree, model) = user();
    let log = recorder();
    let l = Rc::clone(&log);
    model.on("user.set.name", move |_, _| {
        l.borrow_mut().push("fired".into());
        Ok(())
    });

    model.set_suppressed([("name", "quiet")]);
    assert!(log.borrow().is_empty());
    assert_eq!(model.get("name").unwrap(), "quiet");
}
