//! Record a payment against an existing sale.
//!
//! ```text
//! GYM_API_URL=http://localhost:8000/api GYM_EMAIL=desk@club.test GYM_PASSWORD=secret \
//!     cargo run -p gym-client --example checkout -- TRX-0001
//! ```
//!
//! Every enabled payment account is listed and the first one absorbs the
//! remaining balance.

use anyhow::Context;
use gym_client::logger::init_logger;
use gym_client::{AllocatorAction, CheckoutForm, ClientConfig, GymClient, SaveMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logger();

    let code = std::env::args().nth(1).context("usage: checkout <sale-code>")?;
    let mut client = GymClient::new(ClientConfig::from_env())?;

    if client.http().token().is_some() {
        client.restore_session().await?;
    } else {
        let email = std::env::var("GYM_EMAIL").context("GYM_EMAIL not set")?;
        let password = std::env::var("GYM_PASSWORD").context("GYM_PASSWORD not set")?;
        client.login(&email, &password).await?;
    }

    let accounts = client.payment_accounts().collect_all().await?;
    for account in &accounts {
        println!("{:>6}  {}", account.id, account.name);
    }
    let account = accounts.first().context("no payment accounts available")?;

    let sale = client.http().get_sale(&code).await?;
    println!("{} outstanding: {}", sale.code, sale.balance_amount);

    let mut form = CheckoutForm::for_sale(&sale);
    form.dispatch(AllocatorAction::select(account));
    let mode = SaveMode::suggested(form.allocator());

    let saved = client.checkout(&mut form, mode).await?;
    println!("{} saved, balance now {}", saved.code, saved.balance_amount);

    client.logout().await?;
    Ok(())
}
