pub mod complaint_repo;
pub use complaint_repo::ComplaintRepository;
pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod dealer_repo;
pub use dealer_repo::DealerRepository;
pub mod referral_repo;
pub use referral_repo::ReferralRepository;
pub mod subscription_repo;
pub use subscription_repo::SubscriptionRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
