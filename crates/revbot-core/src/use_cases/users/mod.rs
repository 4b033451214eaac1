pub(crate) mod list_user_reviews;
pub(crate) mod set_user_active;

pub use list_user_reviews::ListUserReviewsInterface;
#[cfg(any(test, feature = "testkit"))]
pub use list_user_reviews::MockListUserReviewsInterface;
pub use set_user_active::SetUserActiveInterface;
#[cfg(any(test, feature = "testkit"))]
pub use set_user_active::MockSetUserActiveInterface;
