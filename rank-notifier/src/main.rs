use rank_notifier::{notifier, option};

// One attempt per run, the exit code stays 0 whatever the outcome.
// Scheduling is left to cron or whatever invokes the binary.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let opt = option::load_option();
    notifier::notify_and_report(&opt).await;
}
