//! Session command handlers backed by an [`AuthProvider`].

use shopfront_session::{AuthError, AuthProvider, Session};

pub(crate) async fn run_login(
    auth: &dyn AuthProvider,
    email: &str,
    password: &str,
) -> anyhow::Result<()> {
    let session = auth.login(email, password).await.map_err(describe)?;
    println!("{}", format_signed_in(&session));
    Ok(())
}

pub(crate) async fn run_signup(
    auth: &dyn AuthProvider,
    email: &str,
    password: &str,
    full_name: &str,
) -> anyhow::Result<()> {
    let session = auth
        .signup(email, password, full_name)
        .await
        .map_err(describe)?;
    println!("{}", format_signed_in(&session));
    Ok(())
}

pub(crate) async fn run_logout(auth: &dyn AuthProvider) -> anyhow::Result<()> {
    auth.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub(crate) fn run_whoami(auth: &dyn AuthProvider) -> anyhow::Result<()> {
    match auth.current_session()? {
        Some(session) => println!("{}", format_signed_in(&session)),
        None => println!("Not signed in."),
    }
    Ok(())
}

fn describe(err: AuthError) -> anyhow::Error {
    match err {
        AuthError::MissingCredentials(field) => anyhow::anyhow!("Please fill in the {field}"),
        other => other.into(),
    }
}

fn format_signed_in(session: &Session) -> String {
    format!(
        "Signed in as {} <{}> (id {})",
        session.user.name, session.user.email, session.user.id
    )
}
