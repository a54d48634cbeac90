use std::{process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};

use bookby::{
    RemindRequest, ReminderService,
    appsettings::AppSettings,
    delivery::{LogNotificationSink, NotificationSink, sendgrid::SendGridSink},
    http,
    models::token::BearerToken,
    oauth::{AuthorizationProvider, OAuthClient},
    ride_eta::{RideEtaResolver, uber::UberEtaClient},
    scheduling::ReminderScheduler,
    travel_time::{TravelTimeResolver, google_maps::GoogleDistanceMatrixClient},
};

#[derive(Parser)]
#[command(version, about = "Email a reminder when it is time to book a ride")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the latest booking time and schedule the reminder email.
    Remind {
        /// Pickup location as "lat,lng".
        #[arg(long)]
        source: String,
        /// Destination as "lat,lng".
        #[arg(long)]
        destination: String,
        /// Arrival time, HH:MM or HH:MM:SS.
        #[arg(long)]
        time: String,
        #[arg(long)]
        email: String,
        /// Ride-hailing bearer token.
        #[arg(long, env = "BOOKBY_TOKEN", hide_env_values = true)]
        token: String,
        /// Log the reminder instead of emailing it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the ride-hailing provider's sign-in URL.
    AuthorizeUrl {
        #[arg(long)]
        redirect_uri: String,
    },
    /// Exchange an authorization code for a bearer token.
    ExchangeCode {
        #[arg(long)]
        code: String,
        #[arg(long)]
        redirect_uri: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let cli = Cli::parse();
    let settings = AppSettings::load().context("Could not load appsettings")?;
    let client =
        http::build_client(settings.http.timeout()).context("Could not build HTTP client")?;

    let outcome = match cli.command {
        Command::Remind {
            source,
            destination,
            time,
            email,
            token,
            dry_run,
        } => {
            let sink: Arc<dyn NotificationSink> = if dry_run {
                Arc::new(LogNotificationSink)
            } else {
                Arc::new(SendGridSink::new(
                    client.clone(),
                    settings.email.base_url.clone(),
                    settings.email.api_key.clone(),
                    settings.email.sender.clone(),
                    settings.email.subject.clone(),
                ))
            };

            let service = ReminderService::new(
                TravelTimeResolver::new(Arc::new(GoogleDistanceMatrixClient::new(
                    client.clone(),
                    settings.maps.api_key.clone(),
                    settings.maps.base_url.clone(),
                ))),
                RideEtaResolver::new(
                    Arc::new(UberEtaClient::new(client, settings.ride.base_url.clone())),
                    settings.ride.product_name.clone(),
                ),
                ReminderScheduler::new(sink),
            );

            let request = RemindRequest {
                source,
                destination,
                target_time: time,
                recipient: email,
                token: BearerToken::new(token),
            };

            service.remind(request).await.map(|notification| {
                println!(
                    "Book your ride by {}. A reminder will be emailed to {}.",
                    notification.send_at().format("%H:%M:%S"),
                    notification.recipient()
                );
            })
        }
        Command::AuthorizeUrl { redirect_uri } => {
            let oauth = OAuthClient::new(client, settings.oauth.clone());
            oauth.authorize_url(&redirect_uri).map(|url| println!("{url}"))
        }
        Command::ExchangeCode { code, redirect_uri } => {
            let oauth = OAuthClient::new(client, settings.oauth.clone());
            oauth
                .exchange_code(&code, &redirect_uri)
                .await
                .map(|token| println!("{}", token.secret()))
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            log::error!("Request failed: {error}");
            eprintln!("{}", error.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}
