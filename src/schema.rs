table! {
    carts (cart_id) {
        cart_id -> Int4,
        item_id -> Int4,
        user_id -> Int4,
    }
}

table! {
    categories (category_name) {
        category_name -> Varchar,
    }
}

table! {
    checkout_items (checkout_item_id) {
        checkout_item_id -> Int4,
        checkout_id -> Int4,
        item_id -> Int4,
        due_date -> Date,
        return_date -> Nullable<Date>,
    }
}

table! {
    checkouts (checkout_id) {
        checkout_id -> Int4,
        user_borrowed_by -> Int4,
        checkout_date -> Date,
    }
}

table! {
    communities (community_id) {
        community_id -> Int4,
        community_name -> Varchar,
        community_description -> Nullable<Varchar>,
        location -> Nullable<Varchar>,
    }
}

table! {
    community_members (community_member_id) {
        community_member_id -> Int4,
        community_id -> Int4,
        user_id -> Int4,
    }
}

table! {
    items (item_id) {
        item_id -> Int4,
        user_id -> Int4,
        item_name -> Varchar,
        item_description -> Nullable<Varchar>,
        image_url -> Varchar,
        category_name -> Varchar,
        status_code -> Varchar,
    }
}

table! {
    statuses (checkout_status) {
        checkout_status -> Varchar,
    }
}

table! {
    users (user_id) {
        user_id -> Int4,
        first_name -> Nullable<Varchar>,
        last_name -> Nullable<Varchar>,
        email -> Varchar,
        password -> Varchar,
        city -> Nullable<Varchar>,
        phone -> Nullable<Varchar>,
    }
}

joinable!(carts -> items (item_id));
joinable!(carts -> users (user_id));
joinable!(checkout_items -> checkouts (checkout_id));
joinable!(checkout_items -> items (item_id));
joinable!(checkouts -> users (user_borrowed_by));
joinable!(community_members -> communities (community_id));
joinable!(community_members -> users (user_id));
joinable!(items -> categories (category_name));
joinable!(items -> statuses (status_code));
joinable!(items -> users (user_id));

allow_tables_to_appear_in_same_query!(
    carts,
    categories,
    checkout_items,
    checkouts,
    communities,
    community_members,
    items,
    statuses,
    users,
);
