// Mirrors sql/tickers.sql. The table has no key of its own; `name` is
// declared here only because diesel requires one.

diesel::table! {
    tickers (name) {
        name -> Text,
        last -> Text,
        buy -> Text,
        sell -> Text,
        volume -> Text,
        base_unit -> Text,
    }
}
