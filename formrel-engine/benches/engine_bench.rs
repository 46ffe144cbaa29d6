use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use formrel_engine::{Dependency, DependencyIndex, Relation, RelationEngine, RelationSet};
use formrel_form::{Form, FormField};

const FIELD_COUNT: usize = 200;
const RELATION_COUNT: usize = 500;

fn relations() -> RelationSet {
    let relations = (0..RELATION_COUNT)
        .map(|i| {
            Relation::new(vec![
                Dependency::equal(format!("f{}", i % FIELD_COUNT), "1"),
                Dependency::equal(format!("f{}", (i * 7) % FIELD_COUNT), "1"),
            ])
            .pattern(if i % 2 == 0 { "all" } else { "any" })
            .target(format!("t{}", i % FIELD_COUNT))
            .action("show")
        })
        .collect();
    RelationSet::new(relations).unwrap()
}

fn form() -> Rc<Form> {
    let inputs = (0..FIELD_COUNT).map(|i| FormField::input(format!("f{i}"), "0"));
    let targets = (0..FIELD_COUNT).map(|i| FormField::element(format!("t{i}")));
    Rc::new(Form::from_fields(inputs.chain(targets)).unwrap())
}

fn bench_index_build(c: &mut Criterion) {
    let relations = relations();
    c.bench_function("index_build_500_relations", |b| {
        b.iter(|| DependencyIndex::build(&relations))
    });
}

fn bench_field_change(c: &mut Criterion) {
    let form = form();
    let engine = Rc::new(RelationEngine::new(relations()));
    engine.activate(form.clone()).unwrap();
    form.mark_ready().unwrap();

    let mut flip = false;
    c.bench_function("field_change_500_relations", |b| {
        b.iter(|| {
            flip = !flip;
            form.set_value("f0", if flip { "1" } else { "0" }).unwrap();
        })
    });
}

criterion_group!(benches, bench_index_build, bench_field_change);
criterion_main!(benches);
