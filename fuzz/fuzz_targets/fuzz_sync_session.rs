#![no_main]

//! Drive a model through arbitrary markup and edits. No step may panic,
//! including re-entrant borrows between the tree and the model.

use std::rc::Rc;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mog_core::HostTree;
use mog_dom::{Element, MemoryTree, OptionElement};
use mog_runtime::Model;

#[derive(Debug, Arbitrary)]
enum Control {
    Text,
    Checkbox(u8),
    Radio(u8),
    Select(bool),
    Output,
}

#[derive(Debug, Arbitrary)]
enum Step {
    Set(u8, String),
    Type(u8, String),
    Toggle(u8),
    Check(u8),
    Choose(u8, u8),
    Focus(u8),
    Blur,
    Pull,
    Push,
    Resync,
}

#[derive(Debug, Arbitrary)]
struct Session {
    controls: Vec<(Control, u8)>,
    steps: Vec<Step>,
}

const PROPERTIES: [&str; 3] = ["a", "b", "c"];
const OPTIONS: [&str; 3] = ["x", "y", "z"];

fn build(control: &Control, property: &str) -> Element {
    let marker = format!("m[{property}]");
    match control {
        Control::Text => Element::text_input().attr("data-mog-input", marker),
        Control::Checkbox(v) => Element::checkbox(OPTIONS[*v as usize % 3]).attr("data-mog-input", marker),
        Control::Radio(v) => {
            Element::radio(property, OPTIONS[*v as usize % 3]).attr("data-mog-input", marker)
        }
        Control::Select(multiple) => {
            let options = OPTIONS.iter().map(|t| OptionElement::new(*t));
            let el = if *multiple {
                Element::multi_select(options)
            } else {
                Element::select(options)
            };
            el.attr("data-mog-input", marker)
        }
        Control::Output => Element::span().attr("data-mog-output", marker),
    }
}

fuzz_target!(|session: Session| {
    let tree = Rc::new(MemoryTree::new());
    let mut nodes = Vec::new();
    for (control, p) in session.controls.iter().take(16) {
        nodes.push(tree.append(build(control, PROPERTIES[*p as usize % 3])));
    }
    let model = Model::new("m", Rc::clone(&tree) as Rc<dyn HostTree>);
    model.sync().expect("generated markers are well formed");

    let pick = |i: u8| (!nodes.is_empty()).then(|| nodes[i as usize % nodes.len()]);
    for step in session.steps.iter().take(64) {
        match step {
            Step::Set(p, v) => model.set([(PROPERTIES[*p as usize % 3], v.as_str())]),
            Step::Type(i, v) => pick(*i).into_iter().for_each(|n| tree.type_text(n, v)),
            Step::Toggle(i) => pick(*i).into_iter().for_each(|n| tree.toggle(n)),
            Step::Check(i) => pick(*i).into_iter().for_each(|n| tree.check(n)),
            Step::Choose(i, o) => pick(*i)
                .into_iter()
                .for_each(|n| tree.choose(n, &[OPTIONS[*o as usize % 3]])),
            Step::Focus(i) => pick(*i).into_iter().for_each(|n| tree.focus(n)),
            Step::Blur => tree.blur(),
            Step::Pull => model.pull(),
            Step::Push => model.push(None),
            Step::Resync => {
                model.sync().expect("generated markers are well formed");
            }
        }
    }
});
