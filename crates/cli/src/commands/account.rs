//! Account commands.

use jabuticaba_core::UserRole;
use jabuticaba_storefront::accounts::{AccountError, Accounts};
use jabuticaba_storefront::models::UserDraft;

use super::Context;

/// Register a customer account.
#[allow(clippy::print_stdout)]
pub fn register(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
) -> Result<(), AccountError> {
    let accounts = Accounts::new(ctx.store.clone());
    let user = accounts.register(UserDraft {
        name,
        email,
        password,
        role: UserRole::Customer,
    })?;
    println!("Registered {} <{}>", user.name, user.email);
    Ok(())
}

/// Sign in, replacing any existing session.
#[allow(clippy::print_stdout)]
pub fn login(ctx: &Context, email: &str, password: &str) -> Result<(), AccountError> {
    let accounts = Accounts::new(ctx.store.clone());
    let session = accounts.login(email, password)?;
    println!("Signed in as {} <{}>", session.name, session.email);
    Ok(())
}

/// Sign out.
#[allow(clippy::print_stdout)]
pub fn logout(ctx: &Context) {
    Accounts::new(ctx.store.clone()).logout();
    println!("Signed out.");
}

/// Show the signed-in customer, if any.
#[allow(clippy::print_stdout)]
pub fn whoami(ctx: &Context) {
    match Accounts::new(ctx.store.clone()).current() {
        Some(session) => println!("{} <{}> ({})", session.name, session.email, session.role),
        None => println!("Not signed in."),
    }
}
