//! End-to-end prompt scenarios through the handler, stream and driver

use anvil_console::{
    channel, ConsoleDriver, DriverConfig, DriverStats, EventReceiver, LineSource, ScriptedInput,
    GIVE_UP_MESSAGE,
};
use anvil_core::{IntRange, LogLevel, OperationId, RecordingOutput, RequiredText, YesNo};
use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::task::JoinHandle;

type Finished<I> = (ConsoleDriver<RecordingOutput, I>, DriverStats);

/// Run a driver over `events` on its own task
fn spawn_driver<I>(input: I, config: DriverConfig, events: EventReceiver) -> JoinHandle<Finished<I>>
where
    I: LineSource + 'static,
{
    let mut driver = ConsoleDriver::new(RecordingOutput::new(), input, config);
    tokio::spawn(async move {
        let stats = driver.run(events).await.expect("driver failed");
        (driver, stats)
    })
}

fn scripted(lines: &[&str]) -> ScriptedInput {
    ScriptedInput::new(lines.iter().copied())
}

/// Line source that never produces a line
struct Silent;

#[async_trait]
impl LineSource for Silent {
    async fn read_line(&mut self) -> io::Result<Option<String>> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn yes_no_prompt_replaces_text_until_valid() {
    let (handler, events) = channel(8);
    let console = spawn_driver(scripted(&["maybe", "n"]), DriverConfig::default(), events);

    let answer = handler.ask_yes_no("Continue? [y/n]").await.unwrap();
    drop(handler);
    let (driver, stats) = console.await.unwrap();

    assert_eq!(answer, Some(false));
    assert_eq!(
        driver.output().transcript(),
        "\nContinue? [y/n]\nplease answer y or n"
    );
    assert_eq!(stats.answered, 1);
    assert_eq!(stats.retries, 1);
}

#[tokio::test]
async fn free_text_accepts_empty_but_required_text_does_not() {
    let (handler, events) = channel(8);
    let console = spawn_driver(scripted(&["", "", "Ada"]), DriverConfig::default(), events);

    let free = handler.ask_text("Enter your name:", None).await.unwrap();
    let required = handler.ask("Enter your name:", RequiredText).await.unwrap();
    drop(handler);
    let (driver, stats) = console.await.unwrap();

    assert_eq!(free, Some(String::new()));
    assert_eq!(required, Some("Ada".to_string()));
    // Required text repeats the original prompt on the empty line
    assert_eq!(
        driver.output().transcript(),
        "\nEnter your name:\nEnter your name:\nEnter your name:"
    );
    assert_eq!(stats.rendered, 3);
}

#[tokio::test]
async fn queued_prompts_never_interleave() {
    let (handler, events) = channel(8);

    // Both prompts are on the stream before the driver starts
    let first = handler.submit("First? [y/n]", YesNo).await.unwrap();
    let second = handler.submit("Second? [y/n]", YesNo).await.unwrap();
    drop(handler);

    let console = spawn_driver(
        scripted(&["x", "z", "y", "n"]),
        DriverConfig::default(),
        events,
    );

    assert_eq!(first.wait().await, Some(true));
    assert_eq!(second.wait().await, Some(false));
    let (driver, stats) = console.await.unwrap();

    assert_eq!(
        driver.output().transcript(),
        "\nFirst? [y/n]\nplease answer y or n\nplease answer y or n\nSecond? [y/n]"
    );
    assert_eq!(stats.retries, 2);
    assert_eq!(driver.input().reads(), 4);
}

#[tokio::test]
async fn log_events_wait_behind_outstanding_prompt() {
    let (handler, events) = channel(8);
    let worker = handler.with_operation(OperationId::new(7));

    let pending = handler.submit("Proceed? [y/n]", YesNo).await.unwrap();
    worker
        .log(LogLevel::Lifecycle, "build", "Compiling module")
        .await
        .unwrap();
    drop(worker);
    drop(handler);

    let console = spawn_driver(scripted(&["y"]), DriverConfig::default(), events);
    assert_eq!(pending.wait().await, Some(true));
    let (driver, _) = console.await.unwrap();

    assert_eq!(
        driver.output().transcript(),
        "\nProceed? [y/n]Compiling module\n"
    );
}

#[tokio::test]
async fn end_of_input_abandons_every_remaining_prompt() {
    let (handler, events) = channel(8);
    let first = handler.submit("Name:", RequiredText).await.unwrap();
    let second = handler.submit("Continue? [y/n]", YesNo).await.unwrap();
    handler
        .log(LogLevel::Warn, "build", "still rendering")
        .await
        .unwrap();
    drop(handler);

    let console = spawn_driver(scripted(&[""]), DriverConfig::default(), events);

    assert_eq!(first.wait().await, None);
    assert_eq!(second.wait().await, None);
    let (driver, stats) = console.await.unwrap();

    assert!(driver.input_closed());
    assert_eq!(stats.abandoned, 2);
    assert!(driver.output().transcript().ends_with("still rendering\n"));
    assert!(!driver.output().transcript().contains("Continue?"));
}

#[tokio::test]
async fn max_attempts_abandons_prompt_and_moves_on() {
    let (handler, events) = channel(8);
    let config = DriverConfig {
        max_attempts: Some(2),
    };
    let console = spawn_driver(scripted(&["zero", "0", "4"]), config, events);

    let exhausted = handler
        .ask_int("Workers", IntRange::between(1, 8))
        .await
        .unwrap();
    let next = handler
        .ask_int("Retries", IntRange::at_least(0))
        .await
        .unwrap();
    drop(handler);
    let (driver, stats) = console.await.unwrap();

    assert_eq!(exhausted, None);
    assert_eq!(next, Some(4));
    assert!(driver
        .output()
        .transcript()
        .contains(&format!("{GIVE_UP_MESSAGE}\n")));
    assert_eq!(stats.abandoned, 1);
    assert_eq!(stats.answered, 1);
}

#[tokio::test]
async fn cancellation_interrupts_pending_read() {
    let (handler, events) = channel(8);
    let mut driver = ConsoleDriver::new(RecordingOutput::new(), Silent, DriverConfig::default());
    let cancel = driver.cancellation_token();
    let console = tokio::spawn(async move { driver.run(events).await });

    let pending = handler.submit("Continue? [y/n]", YesNo).await.unwrap();
    let queued = handler.submit("Never shown", YesNo).await.unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;
    cancel.cancel();

    assert_eq!(pending.wait().await, None);
    assert_eq!(queued.wait().await, None);
    let stats = console.await.unwrap().unwrap();
    assert_eq!(stats.abandoned, 1);
    assert_eq!(stats.answered, 0);
}

#[tokio::test]
async fn requester_dropping_its_handle_does_not_stall_driver() {
    let (handler, events) = channel(8);
    let abandoned = handler.submit("Ignored? [y/n]", YesNo).await.unwrap();
    drop(abandoned);
    let kept = handler.submit("Kept? [y/n]", YesNo).await.unwrap();
    drop(handler);

    let console = spawn_driver(scripted(&["y", "n"]), DriverConfig::default(), events);
    assert_eq!(kept.wait().await, Some(false));
    let (_, stats) = console.await.unwrap();
    assert_eq!(stats.answered, 2);
}
