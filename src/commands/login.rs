use std::io::{self, Write};

use anyhow::{bail, Result};

use crate::credentials::{credentials_path, Credentials};

/// Ask for a personal access token and store it with `url` in `$HOME/.creds`.
pub fn login(url: &str) -> Result<()> {
    let url = format!("{}/", url.trim_end_matches('/'));

    println!("Create a token with the api scope at {}-/user_settings/personal_access_tokens", url);
    println!("(read_api is enough for listing runners and jobs) and paste it below.");
    print!("Token: ");
    io::stdout().flush()?;

    let mut token = String::new();
    io::stdin().read_line(&mut token)?;
    let token = token.trim();
    if token.is_empty() {
        bail!("no token given, credentials left unchanged");
    }

    let path = credentials_path()?;
    Credentials {
        token: token.to_string(),
        url,
    }
    .save_to(&path)?;
    println!("Credentials saved to {}", path.display());
    Ok(())
}
