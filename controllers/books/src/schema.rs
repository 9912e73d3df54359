diesel::table! {
    books (isbn) {
        isbn -> Varchar,
        title -> Text,
        author -> Nullable<Text>,
        year -> Nullable<Int2>,
        publisher -> Nullable<Text>,
        small -> Nullable<Text>,
        medium -> Nullable<Text>,
        large -> Nullable<Text>,
    }
}

// Ratings have no key of their own, diesel just needs one to be declared
diesel::table! {
    ratings (user_id, isbn) {
        user_id -> Int4,
        isbn -> Varchar,
        book_rating -> Int4,
    }
}

diesel::table! {
    users (user_id) {
        user_id -> Int4,
        location -> Nullable<Text>,
        age -> Nullable<Text>,
    }
}

diesel::joinable!(ratings -> books (isbn));
diesel::joinable!(ratings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    books,
    ratings,
    users,
);
