table! {
    sessions (id) {
        id -> Integer,
        token -> Text,
        user_id -> BigInt,
        full_name -> Text,
        email -> Text,
        account_created_at -> Nullable<Text>,
        saved_at -> Text,
    }
}
