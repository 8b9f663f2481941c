pub(crate) mod checkout_management;
pub(crate) mod closet_management;
pub(crate) mod community_management;
pub(crate) mod user_management;

#[cfg(test)]
mod tests;

use rocket::Route;

pub(crate) fn routes() -> Vec<Route> {
    routes![
        user_management::register::new_user,
        user_management::login::login,
        user_management::login::check_login,
        user_management::login::logout,
        user_management::account::home,
        user_management::account::my_account,
        closet_management::list::my_closet,
        closet_management::upload::upload_item,
        closet_management::categories::get_categories,
        closet_management::search::find_item,
        community_management::list::community_closet,
        community_management::create::create_community,
        community_management::join::join_community,
        community_management::items::community_items,
        community_management::members::community_members,
        checkout_management::cart::add_to_cart,
        checkout_management::cart::get_cart,
        checkout_management::cart::remove_from_cart,
        checkout_management::checkout::checkout,
        checkout_management::checkout::get_checkouts,
        checkout_management::return_item::return_item,
    ]
}
