use anyhow::{Context as _, Result};
use console::{style, StyledObject};

use crate::args::Args;
use crate::codec::MAX_PIN;
use crate::config::StoreConfig;
use crate::gist_api::{GistClient, RemoteStore};
use crate::service::{AuthError, LedgerService, OperationError, Session};
use crate::terminal;

pub async fn main(args: Args) -> Result<()> {
    let config = StoreConfig::from_env()?.with_max_content_len(args.max_content_len);
    let service = LedgerService::new(GistClient::new(config));

    let mut session = login(&service).await?;
    println!();
    println!(
        "{}",
        style_header(&format!("Welcome, {}!", session.name()))
    );
    menu_loop(&service, &mut session).await
}

async fn login(service: &LedgerService<impl RemoteStore>) -> Result<Session> {
    loop {
        let id = terminal::input("Account number")?;
        let Some(pin) = terminal::input_pin("PIN")?.filter(|pin| (0..=i64::from(MAX_PIN)).contains(pin))
        else {
            print_error(&format!("The PIN is a number between 0 and {MAX_PIN}."));
            continue;
        };
        match service.authenticate(&id, pin as u16).await {
            Ok(session) => return Ok(session),
            Err(err @ (AuthError::NotFound | AuthError::WrongPin)) => print_error(&err.to_string()),
            Err(err) => return Err(err).context("Failed to load the ledger"),
        }
    }
}

async fn menu_loop(
    service: &LedgerService<impl RemoteStore>,
    session: &mut Session,
) -> Result<()> {
    loop {
        println!();
        let choice = terminal::select(
            "What would you like to do?",
            &[
                "Check Balance",
                "Withdraw",
                "Deposit",
                "Account Settings",
                "Exit",
            ],
        )?;
        match choice {
            0 => println!("Your balance is {}", style(session.balance()).green().bold()),
            1 => {
                let amount = terminal::input_amount("Amount to withdraw")?;
                report(service.withdraw(session, amount).await);
            }
            2 => {
                let amount = terminal::input_amount("Amount to deposit")?;
                report(service.deposit(session, amount).await);
            }
            3 => settings(service, session).await?,
            _ => return Ok(()),
        }
    }
}

async fn settings(
    service: &LedgerService<impl RemoteStore>,
    session: &mut Session,
) -> Result<()> {
    let choice = terminal::select(
        "Account settings",
        &["Change account holder name", "Change PIN", "Back"],
    )?;
    match choice {
        0 => {
            let new_name = terminal::input("New account holder name")?;
            report(service.rename_account(session, &new_name).await);
        }
        1 => {
            let Some(new_pin) = terminal::input_pin("New PIN")? else {
                print_error("The PIN is a number.");
                return Ok(());
            };
            match service.change_pin(session, new_pin).await {
                Ok(()) => println!(
                    "{}",
                    style("PIN changed. It applies from your next login.").green()
                ),
                result => report(result),
            }
        }
        _ => {}
    }
    Ok(())
}

/// Prints the outcome of one mutating operation. Persist failures get a
/// distinct warning: the session already holds the change, the remote
/// ledger may not.
fn report(result: Result<(), OperationError>) {
    match result {
        Ok(()) => println!("{}", style("Done.").green()),
        Err(
            err @ (OperationError::Transport(_)
            | OperationError::Parse(_)
            | OperationError::AccountMissing),
        ) => println!(
            "{}",
            style(format!("Warning: the change may not have been saved: {err}")).yellow()
        ),
        Err(err) => print_error(&err.to_string()),
    }
}

fn print_error(message: &str) {
    println!("{}", style(message).red());
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}
