//! The cooperative's service offerings shown as cards on the page

use serde::Serialize;

/// One service card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    pub title: &'static str,
    pub description: &'static str,
}

/// Cards in display order
pub const SERVICES: [ServiceCard; 6] = [
    ServiceCard {
        title: "Savings",
        description: "Secure savings accounts with competitive interest rates to help you grow your money.",
    },
    ServiceCard {
        title: "Deposit",
        description: "Flexible deposit options with various terms to suit your financial planning needs.",
    },
    ServiceCard {
        title: "Loans",
        description: "Personal and business loans with competitive rates and flexible repayment terms.",
    },
    ServiceCard {
        title: "Salary Accounts",
        description: "Dedicated salary accounts with exclusive benefits for employed individuals.",
    },
    ServiceCard {
        title: "Minor Accounts",
        description: "Special accounts designed for children and teenagers to start their financial journey.",
    },
    ServiceCard {
        title: "More",
        description: "Additional services including insurance, investment advice, and financial planning.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_unique() {
        let mut titles: Vec<_> = SERVICES.iter().map(|s| s.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), SERVICES.len());
    }
}
