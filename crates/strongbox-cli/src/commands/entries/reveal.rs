use secrecy::ExposeSecret;

use crate::app::{open_session, AppContext};
use crate::cli::RevealArgs;
use crate::helpers::resolve_entry_id;

/// Print the secret alone on stdout so it can be piped.
pub fn handle_reveal(ctx: &AppContext, args: &RevealArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(false, None);
    let mut session = open_session(ctx, &ui_ctx)?;
    let id = resolve_entry_id(&args.id, session.entries()?)?;
    let secret = session.reveal_secret(&id)?;
    session.lock();

    tracing::debug!(entry = %id, "secret revealed");
    println!("{}", secret.expose_secret());
    Ok(())
}
