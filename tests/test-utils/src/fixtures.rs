//! Sample journal exports used across test suites

use rstest::*;

/// Broker-style CSV export with non-canonical headers
#[fixture]
pub fn broker_csv() -> &'static str {
    "Ticket,Open Date,Side,Open Price,S/L,T/P,Lots,Profit,Session,Setup\n\
     1001,2024-03-04,Buy,1.1000,1.0950,1.1100,1.0,100.00,London,breakout\n\
     1002,2024-03-04,Sell,1.2000,1.2050,1.1900,0.5,-50.00,New York,breakout\n\
     1003,05.03.2024,BUY,1.1010,1.0990,1.1050,1.0,0,Asia,fade\n\
     1004,2024-03-06,Long,1.1020,1.1000,1.1060,1.0,,London,fade\n"
}

/// Journal JSON in document shape
#[fixture]
pub fn journal_json() -> &'static str {
    r#"[
        {
            "id": "a1",
            "date": "2024-03-04",
            "session": "London",
            "direction": "Long",
            "entryPrice": 1.1,
            "stopLoss": 1.095,
            "takeProfit": 1.11,
            "positionSize": 1.0,
            "pnl": 100.0,
            "result": "Win",
            "strategyId": "breakout"
        },
        {
            "id": "a2",
            "date": "2024-03-05",
            "direction": "Short",
            "entryPrice": 1.2,
            "stopLoss": 1.205,
            "takeProfit": 1.19,
            "positionSize": 1.0,
            "result": "Ongoing"
        }
    ]"#
}
