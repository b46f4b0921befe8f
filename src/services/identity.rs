//! Current signed-in identity, passed explicitly to whoever needs it.
//!
//! Listeners register with [`IdentityContext::subscribe`] and keep the returned
//! [`Subscription`]; dropping it or calling [`Subscription::unsubscribe`] stops
//! notifications.

use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::AppResult;
use crate::models::{Session, User};
use crate::services::auth::Credentials;
use crate::services::backend::BackendClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
}

#[derive(Debug, Clone)]
struct Transition {
    event: AuthEvent,
    session: Option<Session>,
}

#[derive(Clone)]
pub struct IdentityContext {
    current: Arc<watch::Sender<Option<Session>>>,
    transitions: broadcast::Sender<Transition>,
}

impl Default for IdentityContext {
    fn default() -> Self {
        Self::new(None)
    }
}

impl IdentityContext {
    pub fn new(initial: Option<Session>) -> Self {
        let (current, _) = watch::channel(initial);
        let (transitions, _) = broadcast::channel(16);
        Self {
            current: Arc::new(current),
            transitions,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|s| s.access_token.clone())
    }

    /// Latest session without waiting for a transition.
    pub fn watch(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }

    pub fn set_session(&self, session: Session) {
        self.current.send_replace(Some(session.clone()));
        let _ = self.transitions.send(Transition {
            event: AuthEvent::SignedIn,
            session: Some(session),
        });
    }

    pub fn clear(&self) {
        self.current.send_replace(None);
        let _ = self.transitions.send(Transition {
            event: AuthEvent::SignedOut,
            session: None,
        });
    }

    pub async fn sign_in(&self, backend: &BackendClient, credentials: &Credentials) -> AppResult<User> {
        let session = backend.sign_in_with_password(credentials).await?;
        let user = session.user.clone();
        self.set_session(session);
        Ok(user)
    }

    /// A failed sign-out keeps the current session.
    pub async fn sign_out(&self, backend: &BackendClient) -> AppResult<()> {
        if let Some(token) = self.access_token() {
            backend.sign_out(&token).await?;
        }
        self.clear();
        Ok(())
    }

    /// Calls `listener` for every sign-in/sign-out after this point.
    pub fn subscribe<F>(&self, mut listener: F) -> Subscription
    where
        F: FnMut(AuthEvent, Option<&Session>) + Send + 'static,
    {
        let mut rx = self.transitions.subscribe();
        let handle = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(t) => listener(t.event, t.session.as_ref()),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Identity listener skipped {} transitions", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
        Subscription {
            handle: Some(handle),
        }
    }
}

pub struct Subscription {
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use uuid::Uuid;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session(email: &str) -> Session {
        Session {
            access_token: format!("token-{}", email),
            refresh_token: None,
            token_type: Some("bearer".into()),
            expires_in: Some(3600),
            expires_at: None,
            user: User {
                id: Uuid::new_v4(),
                email: Some(email.into()),
                user_metadata: serde_json::Value::Null,
            },
        }
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<(AuthEvent, Option<String>)>) -> Option<(AuthEvent, Option<String>)> {
        tokio::time::timeout(Duration::from_secs(1), rx.recv()).await.ok().flatten()
    }

    #[tokio::test]
    async fn subscribers_see_transitions_until_unsubscribed() {
        let ctx = IdentityContext::default();
        assert!(ctx.current_user().is_none());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let sub = ctx.subscribe(move |event, session| {
            let email = session.and_then(|s| s.user.email.clone());
            let _ = tx.send((event, email));
        });

        ctx.set_session(session("demo@evently.com"));
        assert_eq!(
            next(&mut rx).await,
            Some((AuthEvent::SignedIn, Some("demo@evently.com".to_string())))
        );
        assert_eq!(ctx.current_user().unwrap().email.as_deref(), Some("demo@evently.com"));

        ctx.clear();
        assert_eq!(next(&mut rx).await, Some((AuthEvent::SignedOut, None)));

        sub.unsubscribe();
        ctx.set_session(session("other@evently.com"));
        // listener task is gone, its sender with it
        assert_eq!(next(&mut rx).await, None);
    }

    #[tokio::test]
    async fn initial_session_is_visible_without_transition() {
        let ctx = IdentityContext::new(Some(session("demo@evently.com")));
        let rx = ctx.watch();
        assert!(rx.borrow().is_some());
        assert_eq!(ctx.access_token().as_deref(), Some("token-demo@evently.com"));
    }

    #[tokio::test]
    async fn sign_in_and_out_through_backend() {
        let server = MockServer::start().await;
        let user_id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "abc",
                "token_type": "bearer",
                "expires_in": 3600,
                "refresh_token": "r1",
                "user": { "id": user_id, "email": "demo@evently.com" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let backend = BackendClient::from_config(&BackendConfig {
            url: server.uri(),
            anon_key: "anon".into(),
            timeout_seconds: 5,
        })
        .unwrap();
        let ctx = IdentityContext::default();

        let user = ctx
            .sign_in(
                &backend,
                &Credentials {
                    email: "demo@evently.com".into(),
                    password: "demo123456".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(ctx.access_token().as_deref(), Some("abc"));

        ctx.sign_out(&backend).await.unwrap();
        assert!(ctx.session().is_none());
    }

    #[tokio::test]
    async fn failed_sign_out_keeps_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({ "msg": "boom" })))
            .mount(&server)
            .await;
        let backend = BackendClient::from_config(&BackendConfig {
            url: server.uri(),
            anon_key: "anon".into(),
            timeout_seconds: 5,
        })
        .unwrap();

        let ctx = IdentityContext::new(Some(session("demo@evently.com")));
        let err = ctx.sign_out(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(ctx.session().is_some());
    }
}
