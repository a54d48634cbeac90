use async_trait::async_trait;
use chrono::{Local, NaiveDateTime, TimeZone};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;

use crate::{
    error::{ReminderError, ReminderResult, Service},
    http,
    models::notification::NotificationRequest,
};

use super::NotificationSink;

#[derive(Debug, Serialize, PartialEq)]
struct MailPayload<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
    send_at: i64,
}

#[derive(Debug, Serialize, PartialEq)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize, PartialEq)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize, PartialEq)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

/// SendGrid v3 `mail/send` sink. Delivery is deferred by SendGrid itself
/// through `send_at`.
pub struct SendGridSink {
    client: Client,
    base_url: String,
    api_key: String,
    sender: String,
    subject: String,
}

impl SendGridSink {
    pub fn new(
        client: Client,
        base_url: String,
        api_key: String,
        sender: String,
        subject: String,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            sender,
            subject,
        }
    }

    fn payload<'a>(&'a self, request: &'a NotificationRequest, send_at: i64) -> MailPayload<'a> {
        MailPayload {
            personalizations: [Personalization {
                to: [Address {
                    email: request.recipient().as_str(),
                }],
            }],
            from: Address {
                email: &self.sender,
            },
            subject: &self.subject,
            content: [Content {
                content_type: "text/plain",
                value: request.message(),
            }],
            send_at,
        }
    }

    fn request(&self, request: &NotificationRequest, send_at: i64) -> RequestBuilder {
        self.client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(request, send_at))
    }
}

fn unix_timestamp<Tz: TimeZone>(send_at: &NaiveDateTime, tz: &Tz) -> Option<i64> {
    tz.from_local_datetime(send_at)
        .earliest()
        .map(|instant| instant.timestamp())
}

#[async_trait]
impl NotificationSink for SendGridSink {
    async fn send(&self, request: &NotificationRequest) -> ReminderResult<()> {
        let send_at = unix_timestamp(request.send_at(), &Local).ok_or_else(|| {
            ReminderError::NotificationRejected(format!(
                "{} does not exist in the local timezone",
                request.send_at()
            ))
        })?;

        let response = self
            .request(request, send_at)
            .send()
            .await
            .map_err(|e| ReminderError::service_unreachable(Service::Notification, e))?;

        let status = response.status();
        if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            log::warn!("SendGrid rejected the reminder. [status = {status}, body = {body}]");
            return Err(ReminderError::NotificationRejected(format!("HTTP {status}: {body}")));
        }

        http::ensure_success(Service::Notification, response).await?;

        log::info!(
            "Reminder for {} accepted for delivery at {}",
            request.recipient(),
            request.send_at()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use crate::models::notification::REMINDER_MESSAGE;

    use super::*;

    fn sink() -> SendGridSink {
        sink_at("https://mail.example.com/v3/mail/send")
    }

    fn sink_at(url: &str) -> SendGridSink {
        SendGridSink::new(
            Client::new(),
            url.to_owned(),
            "mail-key".to_owned(),
            "reminders@example.com".to_owned(),
            "Time to book your ride!".to_owned(),
        )
    }

    fn notification() -> NotificationRequest {
        let send_at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(17, 25, 0)
            .unwrap();
        NotificationRequest::new("rider@example.com".parse().unwrap(), send_at, REMINDER_MESSAGE)
    }

    #[test]
    fn payload_matches_mail_send_shape() {
        let sink = sink();
        let notification = notification();
        let send_at = unix_timestamp(notification.send_at(), &Utc).unwrap();

        let json = serde_json::to_value(sink.payload(&notification, send_at)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "personalizations": [{ "to": [{ "email": "rider@example.com" }] }],
                "from": { "email": "reminders@example.com" },
                "subject": "Time to book your ride!",
                "content": [{ "type": "text/plain", "value": "It's time to book your ride." }],
                "send_at": 1748798700
            })
        );
    }

    #[test]
    fn request_is_authorized_with_the_api_key() {
        let sink = sink();

        let request = sink.request(&notification(), 0).build().unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.headers().get(reqwest::header::AUTHORIZATION).unwrap(),
            "Bearer mail-key"
        );
    }

    async fn send_against(status_line: &'static str, body: &'static str) -> ReminderResult<()> {
        let base_url = http::stub_server::respond_once(status_line, body).await;
        sink_at(&format!("{base_url}/v3/mail/send"))
            .send(&notification())
            .await
    }

    #[tokio::test]
    async fn accepted_mail_is_ok() {
        assert_eq!(send_against("202 Accepted", "").await, Ok(()));
    }

    #[tokio::test]
    async fn bad_request_is_a_rejection() {
        let error = send_against("400 Bad Request", "nope").await.unwrap_err();

        assert_eq!(
            error,
            ReminderError::NotificationRejected("HTTP 400 Bad Request: nope".to_owned())
        );
    }

    #[tokio::test]
    async fn rate_limiting_is_worth_retrying() {
        let error = send_against("429 Too Many Requests", "slow down")
            .await
            .unwrap_err();

        assert!(
            matches!(
                error,
                ReminderError::ServiceUnreachable {
                    service: Service::Notification,
                    ..
                }
            ),
            "error = {error:?}"
        );
    }

    #[tokio::test]
    async fn provider_outage_is_unreachable() {
        let error = send_against("503 Service Unavailable", "").await.unwrap_err();

        assert_eq!(
            error,
            ReminderError::service_unreachable(
                Service::Notification,
                "HTTP 503 Service Unavailable: "
            )
        );
    }
}
