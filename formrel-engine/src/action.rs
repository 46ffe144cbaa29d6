//! Built-in actions. Each maps the relation state onto a pair of toggles.

use std::rc::Rc;

use formrel_model::{ActionFn, Field, Result};

use crate::Registry;

/// `true` shows the target, `false` hides it.
pub fn show(state: bool, target: &dyn Field) -> Result<()> {
    if state { target.show() } else { target.hide() }
    Ok(())
}

/// `true` hides the target, `false` shows it.
pub fn hide(state: bool, target: &dyn Field) -> Result<()> {
    if state { target.hide() } else { target.show() }
    Ok(())
}

/// `true` disables the target, `false` enables it.
pub fn disable(state: bool, target: &dyn Field) -> Result<()> {
    if state { target.disable() } else { target.enable() }
    Ok(())
}

/// `true` enables the target, `false` disables it.
pub fn enable(state: bool, target: &dyn Field) -> Result<()> {
    if state { target.enable() } else { target.disable() }
    Ok(())
}

pub(crate) fn register_builtins(actions: &mut Registry<ActionFn>) {
    actions.register("show", Rc::new(show));
    actions.register("hide", Rc::new(hide));
    actions.register("disable", Rc::new(disable));
    actions.register("enable", Rc::new(enable));
}
