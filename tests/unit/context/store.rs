use super::*;
use crate::foundation::range::RangeSpec;

fn sample() -> Context<&'static str> {
    let mut vars = BTreeMap::new();
    vars.insert("NAME".to_string(), "value".to_string());
    let mut imgs = BTreeMap::new();
    imgs.insert("bg".to_string(), "background-pixels");
    Context::new(
        vars,
        imgs,
        None,
        vec![
            AxisRange::new("x", RangeSpec::new(0, 6, 2).unwrap()),
            AxisRange::new("y", RangeSpec::new(0, 4, 2).unwrap()),
        ],
    )
}

#[test]
fn lookups_fail_lazily_with_typed_errors() {
    let ctx = sample();
    assert_eq!(ctx.get_var("NAME").unwrap(), "value");
    assert_eq!(*ctx.get_img("bg").unwrap(), "background-pixels");

    assert!(matches!(
        ctx.get_var("MISSING"),
        Err(ScriptError::UndefinedVariable(n)) if n == "MISSING"
    ));
    assert!(matches!(
        ctx.get_img("fg"),
        Err(ScriptError::UnknownImage(n)) if n == "fg"
    ));
    assert!(ctx.initial_image().is_none());
}

#[test]
fn coordinates_restart_for_every_pass() {
    let ctx = sample();
    assert_eq!(ctx.coordinate_count(), Some(6));

    let mut first = ctx.coordinates();
    first.next();
    first.next();

    let full: Vec<_> = (&ctx).into_iter().collect();
    assert_eq!(full.len(), 6);
    assert_eq!(full[0].get("x"), Some(0));
    assert_eq!(full[0].get("y"), Some(0));
    assert_eq!(full[5].get("x"), Some(4));
    assert_eq!(full[5].get("y"), Some(2));
    assert_eq!(first.count(), 4);
}

#[test]
fn context_is_shareable_across_threads() {
    let ctx = std::sync::Arc::new(sample());
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let ctx = std::sync::Arc::clone(&ctx);
            std::thread::spawn(move || ctx.coordinates().count())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 6);
    }
    assert_eq!(ctx.axes().len(), 2);
}
