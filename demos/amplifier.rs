//! Walk one amplifier through a control session without a real gateway.
//!
//! The transport half of the channel is drained by a task that just prints
//! what would go onto the bus, and decoded events are fed back in by hand.
//!
//! Run with: cargo run --example amplifier

use myhome_audio::{
    setup_platform, AudioEvent, EventDispatcher, GatewayHandler, PlatformConfig, Source,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config: PlatformConfig = serde_json::from_str(
        r#"{
            "devices": {
                "lounge_amp": { "name": "Lounge", "where": "11", "model": "F502" }
            }
        }"#,
    )?;

    let (gateway, mut outbound) = GatewayHandler::channel();

    // Stand-in for the transport task that owns the bus connection.
    tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            println!("-> bus: {:?}", message);
        }
    });

    let mut players = setup_platform(&config, &gateway);
    let player = &mut players[0];
    let mut updates = player.subscribe();

    player.refresh().await?;
    player.turn_on().await?;
    player.select_source(Source::Stream).await?;
    player.set_volume_level(0.8).await?;

    // Pretend the gateway answered the status request.
    let mut dispatcher = EventDispatcher::new(players);
    dispatcher.dispatch(&AudioEvent::state("11", 1));
    dispatcher.dispatch(&AudioEvent::volume("11", 25));
    dispatcher.dispatch(&AudioEvent::station("11", "Jazz FM"));

    while let Ok(Some(update)) = updates.try_recv() {
        println!("<- update for {}", update.device_id);
    }

    let player = &dispatcher.players()[0];
    println!(
        "{}: {:?}, volume {:.2}, source {}, playing {:?}",
        player.device_id(),
        player.state(),
        player.volume_level(),
        player.source(),
        player.media_title()
    );

    Ok(())
}
