//! Gym client
//!
//! Bundles the HTTP client with the application context so the session
//! token and the client's bearer token never drift apart.

use crate::api::AccountPager;
use crate::checkout_form::CheckoutForm;
use crate::session::{AppContext, Preferences};
use crate::{ClientConfig, ClientResult, HttpClient};
use shared::checkout::SaveMode;
use shared::client::LoginResponse;
use shared::models::{AccountQuery, Sale};
use tracing::info;

/// Permission required to record a checkout
pub const CHECKOUT_PERMISSION: &str = "sales:checkout";

/// Client for one operator session
#[derive(Debug)]
pub struct GymClient {
    config: ClientConfig,
    http: HttpClient,
    context: AppContext,
}

impl GymClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        Self::with_preferences(config, Preferences::default())
    }

    pub fn with_preferences(config: ClientConfig, preferences: Preferences) -> ClientResult<Self> {
        let http = config.build_http_client()?;
        Ok(Self {
            config,
            http,
            context: AppContext::new(preferences),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.context
    }

    pub fn is_logged_in(&self) -> bool {
        self.context.session.is_authenticated()
    }

    /// Login and start a session
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<()> {
        let login = self.http.login(email, password).await?;
        self.start_session(login);
        Ok(())
    }

    /// Resume a session from a stored token (`GYM_API_TOKEN`)
    pub async fn restore_session(&mut self) -> ClientResult<()> {
        let Some(token) = self.http.token().map(str::to_owned) else {
            return Err(crate::ClientError::Unauthorized);
        };
        let user = self.http.me().await?;
        self.start_session(LoginResponse { token, user });
        Ok(())
    }

    fn start_session(&mut self, login: LoginResponse) {
        if self.config.club_id.is_none() {
            self.config.club_id = login.user.club_id;
        }
        self.http.set_token(Some(login.token.clone()));
        self.context.session.sign_in(login);
    }

    /// End the session; local state is cleared even if the server call fails
    pub async fn logout(&mut self) -> ClientResult<()> {
        let result = self.http.logout().await;
        self.context.session.sign_out();
        result
    }

    /// Pager over enabled, payment-eligible accounts of the current club
    pub fn payment_accounts(&self) -> AccountPager<'_> {
        let mut query = AccountQuery::payment_methods(self.config.accounts_per_page);
        if let Some(club_id) = self.config.club_id {
            query = query.for_club(club_id);
        }
        AccountPager::new(&self.http, query)
    }

    /// Re-fetch a sale and correct the form's balance
    pub async fn refresh_form(&self, form: &mut CheckoutForm, code: &str) -> ClientResult<Sale> {
        let sale = self.http.get_sale(code).await?;
        form.refresh_total(&sale);
        Ok(sale)
    }

    /// Save a checkout form after checking the operator may do so
    pub async fn checkout(&self, form: &mut CheckoutForm, mode: SaveMode) -> ClientResult<Sale> {
        self.context.session.require(CHECKOUT_PERMISSION)?;
        info!(?mode, allocated = %form.allocator().allocated(), "Submitting checkout");
        form.save(mode, &self.http).await
    }
}
