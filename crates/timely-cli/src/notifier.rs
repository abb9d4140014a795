//! Console-backed stand-in for the platform notification collaborator.
//!
//! A real device build would route these calls to the OS notification
//! center; the CLI prints what would be scheduled.

use timely_core::reminder::{FireTime, NotificationRequest, Notifier};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn schedule(&self, request: NotificationRequest) -> Result<(), Box<dyn std::error::Error>> {
        let when = match request.fire_at {
            FireTime::Once(at) => format!("at {at}"),
            FireTime::DailyAt(time) => format!("daily at {time}"),
        };
        println!(
            "scheduled #{} [{}] {}: {} -- {}",
            request.id, request.tag, when, request.title, request.body
        );
        Ok(())
    }

    fn cancel(&self, id: i64) -> Result<(), Box<dyn std::error::Error>> {
        println!("cancelled #{id}");
        Ok(())
    }
}
