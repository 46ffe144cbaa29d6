//! Property-based tests for relation triggering.
//!
//! For any relation set over a fixed pool of fields, changing one field must
//! evaluate every relation depending on it exactly once, and no other relation.

use std::cell::Cell;
use std::rc::Rc;

use formrel_engine::{Dependency, PatternSpec, Relation, RelationEngine, RelationSet};
use formrel_form::{Form, FormField};
use proptest::prelude::*;

const FIELDS: [&str; 5] = ["a", "b", "c", "d", "e"];

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn dependency_lists() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..FIELDS.len(), 1..4), 1..10)
}

fn build(deps: &[Vec<usize>]) -> (Rc<Form>, Rc<RelationEngine>, Vec<Rc<Cell<usize>>>) {
    let mut fields: Vec<FormField> = FIELDS.iter().map(|id| FormField::input(*id, "0")).collect();
    fields.push(FormField::element("target"));
    let form = Rc::new(Form::from_fields(fields).unwrap());

    let counters: Vec<Rc<Cell<usize>>> = deps.iter().map(|_| Rc::new(Cell::new(0))).collect();
    let relations = deps
        .iter()
        .zip(&counters)
        .map(|(ids, counter)| {
            let counter = Rc::clone(counter);
            Relation::new(ids.iter().map(|i| Dependency::equal(FIELDS[*i], "1")).collect())
                .pattern(PatternSpec::from_fn(move |states| {
                    counter.set(counter.get() + 1);
                    states.iter().all(|s| *s)
                }))
                .target("target")
                .action("show")
        })
        .collect();

    let engine = Rc::new(RelationEngine::new(RelationSet::new(relations).unwrap()));
    engine.activate(form.clone()).unwrap();
    form.mark_ready().unwrap();
    (form, engine, counters)
}

// =============================================================================
// TRIGGERING PROPERTIES
// =============================================================================

mod triggering_properties {
    use super::*;

    proptest! {
        /// Each change evaluates exactly the relations that depend on the changed field, once each.
        #[test]
        fn change_evaluates_exact_reliers_once(
            deps in dependency_lists(),
            changed in 0..FIELDS.len(),
        ) {
            let (form, _engine, counters) = build(&deps);
            let before: Vec<usize> = counters.iter().map(|c| c.get()).collect();

            form.set_value(FIELDS[changed], "1").unwrap();

            for (i, ids) in deps.iter().enumerate() {
                let expected = usize::from(ids.contains(&changed));
                prop_assert_eq!(counters[i].get() - before[i], expected);
            }
        }

        /// Binding evaluates each relation once per distinct input field it depends on.
        #[test]
        fn bind_evaluates_per_distinct_dependency(deps in dependency_lists()) {
            let (_form, _engine, counters) = build(&deps);
            for (i, ids) in deps.iter().enumerate() {
                let mut distinct = ids.clone();
                distinct.sort_unstable();
                distinct.dedup();
                prop_assert_eq!(counters[i].get(), distinct.len());
            }
        }

        /// Setting the same value twice never re-evaluates anything.
        #[test]
        fn unchanged_value_is_silent(deps in dependency_lists(), changed in 0..FIELDS.len()) {
            let (form, _engine, counters) = build(&deps);
            form.set_value(FIELDS[changed], "1").unwrap();
            let before: Vec<usize> = counters.iter().map(|c| c.get()).collect();

            form.set_value(FIELDS[changed], "1").unwrap();

            let after: Vec<usize> = counters.iter().map(|c| c.get()).collect();
            prop_assert_eq!(before, after);
        }
    }
}
