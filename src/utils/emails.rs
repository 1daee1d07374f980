use lettre::{
    message::{header::ContentType, SinglePart},
    transport::smtp::{
        authentication::{Credentials, Mechanism},
        PoolConfig,
    },
    Message, SmtpTransport, Transport,
};

use crate::entities::user;
use crate::settings::{EmailBackend, Settings};
use crate::types::TokenPurpose;
use crate::utils::{auth::tokens::issue_confirmation_token, uid::encode_user_id};

#[tracing::instrument(
    name = "Generic e-mail sending function.",
    skip(subject, text_content, settings),
    fields(recipient_email = %recipient_email, recipient_username = %recipient_username)
)]
pub fn send_email(
    recipient_email: &str,
    recipient_username: &str,
    subject: impl Into<String>,
    text_content: String,
    settings: &Settings,
) -> Result<(), String> {
    let subject = subject.into();

    if settings.email.backend == EmailBackend::Console {
        tracing::event!(target: "backend", tracing::Level::INFO, "Console email backend; not delivering. To: {} <{}>. Subject: {}. Body: {}", recipient_username, recipient_email, subject, text_content);
        return Ok(());
    }

    let email = Message::builder()
        .from(match settings.email.sender.parse() {
            Ok(mailbox) => mailbox,
            Err(e) => {
                tracing::event!(target: "backend", tracing::Level::ERROR, "Failed to parse sender mailbox setting: {:#?}", e);
                return Err(e.to_string());
            }
        })
        .to(
            match format!("{} <{}>", recipient_username, recipient_email).parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    tracing::event!(target: "backend", tracing::Level::ERROR, "Failed to parse recipient mailbox: {:#?}", e);
                    return Err(e.to_string());
                }
            },
        )
        .subject(subject)
        .singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_PLAIN)
                .body(text_content),
        )
        .map_err(|e| e.to_string())?;

    let credentials = Credentials::new(
        settings.email.host_user.clone(),
        settings.email.host_user_password.clone(),
    );
    let sender = SmtpTransport::starttls_relay(&settings.email.host)
        .map_err(|e| e.to_string())?
        .credentials(credentials)
        .authentication(vec![Mechanism::Plain])
        .pool_config(PoolConfig::new().max_size(20))
        .build();

    match sender.send(&email) {
        Ok(_) => {
            tracing::event!(target: "backend", tracing::Level::INFO, "Email successfully sent!");
            Ok(())
        }
        Err(e) => {
            tracing::event!(target: "backend", tracing::Level::ERROR, "Could not send email: {:#?}", e);
            Err(format!("Could not send email: {:#?}", e))
        }
    }
}

/// Issues a token for the given purpose and mails the matching link to the
/// user. Delivery is synchronous and a failure is the caller's problem;
/// there is no retry here.
#[tracing::instrument(
    name = "Sending a confirmation link e-mail.",
    skip(user, settings),
    fields(recipient_user_id = %user.id, recipient_email = %user.email)
)]
pub fn send_confirmation_link_email(
    user: &user::Model,
    purpose: TokenPurpose,
    settings: &Settings,
) -> Result<(), String> {
    let issued_token = issue_confirmation_token(user, purpose, settings);
    let uidb64 = encode_user_id(user.id);

    let web_address = {
        if settings.debug {
            format!(
                "{}:{}",
                settings.application.base_url, settings.application.port
            )
        } else {
            settings.application.base_url.clone()
        }
    };

    let (subject, template_name, confirmation_link) = match purpose {
        TokenPurpose::EmailConfirmation => (
            "Confirm your email",
            "confirmation_email.txt",
            format!("{}/confirm_email/{}/{}/", web_address, uidb64, issued_token),
        ),
        TokenPurpose::PasswordReset => (
            "Password reset instructions",
            "password_reset_email.txt",
            format!(
                "{}/password-reset/confirm/{}/{}/",
                web_address, uidb64, issued_token
            ),
        ),
    };

    let template = crate::ENV
        .get_template(template_name)
        .map_err(|e| e.to_string())?;
    let ctx = minijinja::context! {
        username => &user.username,
        confirmation_link => &confirmation_link,
        expiration_minutes => &settings.secret.token_expiration,
    };
    let text = template.render(ctx).map_err(|e| e.to_string())?;

    send_email(&user.email, &user.username, subject, text, settings)
}
