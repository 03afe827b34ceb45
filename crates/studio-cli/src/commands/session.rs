use crate::context::AppContext;
use crate::ui;

pub fn run(ctx: &AppContext, reset: bool) {
    let identity = ctx.session_identity();
    let id = if reset {
        identity.reset()
    } else {
        identity.get_or_create()
    };
    ui::heading(identity.key());
    println!("  {id}");
    println!("  {}", ui::muted(&ctx.paths.state_file().display().to_string()));
}
