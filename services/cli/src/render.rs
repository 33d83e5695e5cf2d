use bademeister::auction::{AuctionPhase, AuctionState, ScheduleStatus};
use bademeister::portraits::Avatar;

pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}

pub(crate) fn auction_state(state: &AuctionState, avatars: &[Avatar]) {
    println!("Offered players");
    if state.players.is_empty() {
        println!("- none yet");
    }

    for (player, avatar) in state.players.iter().zip(avatars) {
        let current = match state.highest_for(&player.id) {
            Some(highest) => format!(
                "{} by {}",
                highest.bid_value,
                or_dash(&highest.bidder_name)
            ),
            None => "—".to_string(),
        };
        println!(
            "- [{}] {} ({}) | start {} | owner {} | current {}",
            player.id,
            player.player_name,
            or_dash(&player.team),
            player.market_value,
            or_dash(&player.owner),
            current
        );
        println!("  {}", avatar_label(avatar));
    }

    println!("\nAll bids");
    if state.bids.is_empty() {
        println!("- none yet");
    }
    for bid in &state.bids {
        println!(
            "- [{}] {} -> {} (player {}) {}",
            bid.id,
            or_dash(&bid.bidder_name),
            bid.bid_value,
            bid.player_id,
            bid.timestamp
        );
    }
}

pub(crate) fn avatar(avatar: &Avatar) {
    println!("{}: {}", avatar.name, avatar_label(avatar));
}

fn avatar_label(avatar: &Avatar) -> String {
    match &avatar.image_url {
        Some(url) => format!("portrait {url}"),
        None => format!("no portrait, initials {}", avatar.initials),
    }
}

pub(crate) fn schedule(status: &ScheduleStatus) {
    match status.phase {
        AuctionPhase::Open => println!("Bidding open, closes in {}", status.countdown),
        AuctionPhase::Closed => println!("Bidding closed, reset in {}", status.countdown),
    }
    println!("Next deadline: {}", status.next_deadline.format("%a %d.%m. %H:%M"));
    println!("Next reset:    {}", status.next_reset.format("%a %d.%m. %H:%M"));
}

pub(crate) fn watch_line(status: &ScheduleStatus, state: &AuctionState) {
    let phase = match status.phase {
        AuctionPhase::Open => "open",
        AuctionPhase::Closed => "closed",
    };
    println!(
        "[{phase} {}] {} players, {} bids",
        status.countdown,
        state.players.len(),
        state.bids.len()
    );
    for player in &state.players {
        if let Some(highest) = state.highest_for(&player.id) {
            println!(
                "  {}: {} by {}",
                player.player_name,
                highest.bid_value,
                or_dash(&highest.bidder_name)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_render_as_dash() {
        assert_eq!(or_dash("  "), "—");
        assert_eq!(or_dash("Kai"), "Kai");
    }

    #[test]
    fn avatar_label_prefers_portrait() {
        let with = Avatar::for_player("Erling Haaland", Some("https://x/img.jpg".to_string()));
        let without = Avatar::for_player("Erling Haaland", None);
        assert_eq!(avatar_label(&with), "portrait https://x/img.jpg");
        assert_eq!(avatar_label(&without), "no portrait, initials EH");
    }
}
