//! Client side of the remote auction service: wire format, transport,
//! typed calls, the user's session, and the weekly calendar.

pub mod calendar;
pub mod client;
pub mod domain;
pub mod request;
pub mod session;
pub mod transport;

pub use calendar::{
    AuctionCalendar, AuctionPhase, Countdown, InvalidWeeklyMoment, ScheduleStatus, WeeklyMoment,
};
pub use client::{AuctionClient, AuctionError};
pub use domain::{AuctionState, Bid, HighestBid, NewPlayer, Player};
pub use request::{AuctionOperation, AuctionRequest, RequestMethod};
pub use session::{AuctionSession, SessionError};
pub use transport::{AuctionTransport, HttpAuctionTransport, RawResponse};
