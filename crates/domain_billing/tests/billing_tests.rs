//! Comprehensive tests for domain_billing

use chrono::Duration;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CustomerId, Money, Rate, Timezone};
use domain_billing::{
    Account, BillingError, EnergyCategory, Ledger, Outbox, RateTable, ReportBuilder, TradeRecord,
    MAX_ALLOCATION, MAX_RATE, MAX_TRADE_QUANTITY,
};
use test_utils::{
    allocation_strategy, assert_err_variant, assert_money_sum_equals,
    assert_statistics_consistent, assert_total_owed_consistent, assert_usage_within_allocation,
    bill_age_days_strategy, energy_category_strategy, money_strategy, province_strategy,
    rate_strategy, usage_sequence_strategy, usage_strategy, AccountBuilder, CustomerFixtures,
    LedgerBuilder, RateFixtures, TemporalFixtures,
};

// ============================================================================
// Account Tests
// ============================================================================

mod account_tests {
    use super::*;

    #[test]
    fn test_issue_bill_scenario() {
        let mut account = AccountBuilder::new()
            .with_allocation(dec!(100))
            .with_usage(dec!(80))
            .build();

        let bill = account.issue_bill(Rate::new(dec!(1.0)), TemporalFixtures::billing_date());

        assert_eq!(bill.amount, Money::new(dec!(80.0)));
        assert_eq!(account.usage(), Decimal::ZERO);
        assert_eq!(account.total_owed(), Money::new(dec!(80)));
    }

    #[test]
    fn test_overdue_boundary() {
        let mut account = AccountBuilder::new().with_usage(dec!(50)).build();
        account.issue_bill(Rate::new(dec!(1)), TemporalFixtures::billing_date());

        assert!(!account.has_overdue_bills(TemporalFixtures::last_day_before_overdue()));
        assert!(account.has_overdue_bills(TemporalFixtures::first_overdue_day()));
    }

    #[test]
    fn test_overdue_scenario_reminder_text() {
        let mut account = AccountBuilder::new().with_usage(dec!(80)).build();
        account.issue_bill(Rate::new(dec!(1)), TemporalFixtures::billing_date());
        let now = TemporalFixtures::first_overdue_day();

        assert!(account.has_overdue_bills(now));
        assert_eq!(account.total_owed(), Money::new(dec!(80)));

        let reminder = account.generate_reminder(now).unwrap();
        let text = reminder.render(&Timezone::default());
        assert!(text.contains("1 days overdue"));
        assert!(text.contains("Bill from 2024-03-01 - Amount: $80.00"));
    }

    #[test]
    fn test_payment_clears_reminder_with_other_bills_overdue() {
        let mut account = AccountBuilder::new().build();
        let start = TemporalFixtures::billing_date();
        account.record_usage(dec!(10)).unwrap();
        account.issue_bill(Rate::new(dec!(1)), start);
        account.record_usage(dec!(20)).unwrap();
        account.issue_bill(Rate::new(dec!(1)), start + Duration::days(1));

        let now = start + Duration::days(60);
        assert!(account.generate_reminder(now).is_some());
        assert!(account.reminder_sent());

        assert!(account.apply_payment(0, Money::new(dec!(10)), now).unwrap());
        assert!(!account.reminder_sent());
        assert!(account.has_overdue_bills(now));

        let reminder = account.generate_reminder(now).unwrap();
        assert_eq!(reminder.notices.len(), 1);
        assert_eq!(reminder.notices[0].amount, Money::new(dec!(20)));
    }

    #[test]
    fn test_second_overdue_bill_suppressed_until_payment() {
        let mut account = AccountBuilder::new().build();
        let start = TemporalFixtures::billing_date();
        account.record_usage(dec!(10)).unwrap();
        account.issue_bill(Rate::new(dec!(1)), start);

        assert!(account.generate_reminder(start + Duration::days(31)).is_some());

        account.record_usage(dec!(10)).unwrap();
        account.issue_bill(Rate::new(dec!(1)), start + Duration::days(31));

        assert!(account.generate_reminder(start + Duration::days(70)).is_none());
    }

    #[test]
    fn test_overdue_amount_counts_only_overdue_bills() {
        let issued = TemporalFixtures::billing_date();
        let ledger = LedgerBuilder::new()
            .with(|a| a.with_id(1))
            .with_bill(1, dec!(40), issued)
            .with_bill(1, dec!(25), issued + Duration::days(20))
            .build();
        let now = TemporalFixtures::first_overdue_day();
        let account = ledger.account(CustomerId::new(1)).unwrap();

        assert_eq!(account.overdue_amount(now), Money::new(dec!(40)));
        assert_eq!(account.total_owed(), Money::new(dec!(65)));

        let overview = ReportBuilder::new(&ledger, Timezone::default()).overview(now);
        assert_eq!(overview.overdue_amount, account.total_owed());
    }

    #[test]
    fn test_overpayment_settles_bill() {
        let mut account = AccountBuilder::new().with_usage(dec!(30)).build();
        account.issue_bill(Rate::new(dec!(2)), TemporalFixtures::billing_date());

        let paid_at = TemporalFixtures::report_date();
        assert!(account.apply_payment(0, Money::new(dec!(100)), paid_at).unwrap());
        assert!(account.bills()[0].paid);
        assert_eq!(account.bills()[0].paid_at, Some(paid_at));
        assert!(account.total_owed().is_zero());
    }
}

// ============================================================================
// Ledger Tests
// ============================================================================

mod ledger_tests {
    use super::*;

    fn two_province_ledger() -> Ledger {
        LedgerBuilder::new()
            .with(|a| a.with_id(1001).with_profile(CustomerFixtures::john_smith()))
            .with(|a| a.with_id(1002).with_profile(CustomerFixtures::marie_roy()))
            .with(|a| a.with_id(1003).with_name("Sam Hill").with_email("shill@email.com"))
            .build()
    }

    #[test]
    fn test_duplicate_id_is_no_op() {
        let mut ledger = two_province_ledger();
        let duplicate = AccountBuilder::new().with_id(1002).in_province("Alberta").build();

        assert_eq!(
            ledger.add_account(duplicate),
            Err(BillingError::DuplicateId(CustomerId::new(1002)))
        );
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.account(CustomerId::new(1002)).unwrap().province(), "Quebec");
    }

    #[test]
    fn test_province_index_matches_accounts() {
        let ledger = two_province_ledger();

        for (province, ids) in ledger.provinces() {
            for id in ids {
                assert_eq!(ledger.account(*id).unwrap().province(), province);
            }
        }
        for account in ledger.accounts() {
            assert!(ledger.provinces().any(|(p, ids)| p == account.province() && ids.contains(&account.id())));
        }
    }

    #[test]
    fn test_find_accounts_empty_query_matches_all() {
        let ledger = two_province_ledger();

        assert_eq!(ledger.find_accounts("", None).len(), 3);
        assert_eq!(ledger.find_accounts("", Some("Ontario")).len(), 2);
        assert_eq!(ledger.find_accounts("mroy", None)[0].id(), CustomerId::new(1002));
        assert!(ledger.find_accounts("mroy", Some("Ontario")).is_empty());
    }

    #[test]
    fn test_billing_cycle_prices_by_category() {
        let mut ledger = LedgerBuilder::new()
            .with_rates(RateFixtures::standard())
            .with(|a| a.with_id(1).with_category(EnergyCategory::CrudeOil).with_usage(dec!(100)))
            .with(|a| a.with_id(2).with_category(EnergyCategory::NaturalGas).with_usage(dec!(100)))
            .with(|a| a.with_id(3).with_category(EnergyCategory::Nuclear))
            .build();

        let summary = ledger.run_billing_cycle(TemporalFixtures::billing_date());

        assert_eq!(summary.accounts_billed, 2);
        assert_eq!(summary.total_billed, Money::new(dec!(210)));
        assert!(ledger.account(CustomerId::new(3)).unwrap().bills().is_empty());
        assert!(ledger.accounts().iter().all(|a| a.usage().is_zero()));
    }

    #[test]
    fn test_ledger_routed_mutators_reject_unknown_ids() {
        let mut ledger = two_province_ledger();
        let now = TemporalFixtures::billing_date();
        let unknown = CustomerId::new(42);

        assert_err_variant!(ledger.record_usage(unknown, dec!(1)), BillingError::AccountNotFound(_));
        assert_err_variant!(
            ledger.apply_payment(unknown, 0, Money::new(dec!(1)), now),
            BillingError::AccountNotFound(_)
        );
        assert_err_variant!(
            ledger.add_maintenance(unknown, "Equipment check", Money::new(dec!(50)), now),
            BillingError::AccountNotFound(_)
        );
    }

    #[test]
    fn test_dispatch_reminders() {
        let mut ledger = LedgerBuilder::new()
            .with(|a| a.with_id(1))
            .with(|a| a.with_id(2))
            .with(|a| a.with_id(3))
            .with_standard_bill(1, dec!(10))
            .with_standard_bill(3, dec!(10))
            .build();
        let now = TemporalFixtures::first_overdue_day();
        let mut outbox = Outbox::new();

        assert_eq!(ledger.dispatch_reminders(now, &mut outbox), 2);
        assert_eq!(ledger.overdue_accounts(now).len(), 2);

        let recipients: Vec<_> = outbox.into_reminders().iter().map(|r| r.customer_id.value()).collect();
        assert_eq!(recipients, vec![1, 3]);

        let mut again = Outbox::new();
        assert_eq!(ledger.dispatch_reminders(now, &mut again), 0);
        assert!(again.is_empty());
    }

    #[test]
    fn test_random_customers_are_indexed_by_province() {
        let profile = CustomerFixtures::random_in("Manitoba");
        let name = profile.name.clone();
        let ledger = LedgerBuilder::new()
            .with(|a| a.with_id(7).with_profile(profile))
            .build();

        let found = ledger.find_accounts(&name, Some("Manitoba"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), CustomerId::new(7));
        assert!(ledger.find_accounts(&name, Some("Ontario")).is_empty());
    }

    #[test]
    fn test_billing_cycle_total_matches_new_bills() {
        let mut ledger = LedgerBuilder::new()
            .with_rates(RateFixtures::standard())
            .with(|a| a.with_id(1).with_category(EnergyCategory::CrudeOil).with_usage(dec!(12.5)))
            .with(|a| a.with_id(2).with_category(EnergyCategory::Nuclear).with_usage(dec!(300)))
            .with(|a| a.with_id(3).with_category(EnergyCategory::NaturalGas).with_usage(dec!(0.75)))
            .build();

        let summary = ledger.run_billing_cycle(TemporalFixtures::billing_date());

        let amounts: Vec<Money> = ledger.accounts().iter().flat_map(|a| a.bills()).map(|b| b.amount).collect();
        assert_eq!(summary.accounts_billed, 3);
        assert_money_sum_equals(&amounts, summary.total_billed);
    }

    #[test]
    fn test_oversized_allocation_rejected() {
        let result = Account::new(
            CustomerId::new(1),
            CustomerFixtures::john_smith(),
            EnergyCategory::Solar,
            Decimal::MAX,
        );
        assert_err_variant!(result, BillingError::InvalidAllocation(_));
    }

    #[test]
    fn test_largest_values_bill_and_aggregate() {
        let rates = RateTable::new(EnergyCategory::ALL.map(|c| (c, Rate::new(MAX_RATE)))).unwrap();
        let mut builder = LedgerBuilder::new().with_rates(rates);
        for id in 1..=5 {
            builder = builder.with(|a| a.with_id(id).with_allocation(MAX_ALLOCATION).with_usage(MAX_ALLOCATION));
        }
        let mut ledger = builder.build();
        let now = TemporalFixtures::billing_date();

        let summary = ledger.run_billing_cycle(now);
        assert_eq!(summary.total_billed.amount(), MAX_ALLOCATION * MAX_RATE * dec!(5));

        for _ in 0..3 {
            let trade = TradeRecord::import(EnergyCategory::Solar, MAX_TRADE_QUANTITY, Rate::new(MAX_RATE), now).unwrap();
            ledger.record_trade(trade).unwrap();
        }

        let stats = ledger.statistics(now);
        assert_eq!(stats[0].total_allocated, MAX_ALLOCATION * dec!(5));
        assert_statistics_consistent(&ledger, now);

        let report = ReportBuilder::new(&ledger, Timezone::default()).build(TemporalFixtures::first_overdue_day());
        assert_eq!(report.trade.total_imports.amount(), MAX_TRADE_QUANTITY * MAX_RATE * dec!(3));
        assert_eq!(report.overall.overdue_count, 5);
    }

    #[test]
    fn test_statistics_after_billing_do_not_double_count() {
        let mut ledger = LedgerBuilder::new()
            .with(|a| a.with_id(1).with_allocation(dec!(300)).with_usage(dec!(100)))
            .with(|a| a.with_id(2).with_allocation(dec!(200)).with_usage(dec!(50)))
            .build();
        let now = TemporalFixtures::billing_date();

        ledger.run_billing_cycle(now);
        let stats = ledger.statistics(now);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].total_allocated, dec!(500));
        assert_eq!(stats[0].total_used, Decimal::ZERO);
        assert_eq!(stats[0].total_remaining, dec!(500));
        assert_eq!(stats[0].total_unpaid, Money::new(dec!(150)));
        assert_statistics_consistent(&ledger, now);
    }

    #[test]
    fn test_negative_trade_rejected_by_ledger() {
        let mut ledger = two_province_ledger();
        let mut trade = TradeRecord::import(
            EnergyCategory::Solar,
            dec!(10),
            Rate::new(dec!(1)),
            TemporalFixtures::billing_date(),
        )
        .unwrap();
        trade.quantity = dec!(-10);

        assert_err_variant!(ledger.record_trade(trade), BillingError::InvalidTrade(_));
        assert!(ledger.trades().is_empty());
    }
}

// ============================================================================
// Report Tests
// ============================================================================

mod report_tests {
    use super::*;

    #[test]
    fn test_empty_ledger_report() {
        let ledger = Ledger::new(RateTable::standard());
        let report = ReportBuilder::new(&ledger, Timezone::default()).build(TemporalFixtures::report_date());

        assert_eq!(report.overall.customer_count, 0);
        assert_eq!(report.overall.overdue_percentage, Decimal::ZERO);
        assert!(report.provinces.is_empty());
        let text = report.to_string();
        assert!(text.lines().any(|line| line == "Overdue Customers: 0 (0.0%)"));
        assert!(text.lines().any(|line| line == "Total Unpaid: $0.00"));
    }

    #[test]
    fn test_net_balance_scenario() {
        let mut ledger = Ledger::new(RateTable::standard());
        let at = TemporalFixtures::billing_date();
        ledger
            .record_trade(TradeRecord::import(EnergyCategory::Solar, dec!(10), Rate::new(dec!(2)), at).unwrap())
            .unwrap();
        ledger
            .record_trade(TradeRecord::export(EnergyCategory::Nuclear, dec!(5), Rate::new(dec!(3)), at).unwrap())
            .unwrap();

        let report = ReportBuilder::new(&ledger, Timezone::default()).build(at);

        assert_eq!(report.trade.net_balance, Money::new(dec!(5)));
        let text = report.to_string();
        assert!(text.contains("Total Imports: $20.00"));
        assert!(text.contains("Total Exports: $15.00"));
        assert!(text.contains("Net Balance: $5.00"));
        assert!(text.contains("  Solar: $20.00"));
        assert!(text.contains("  Nuclear: $15.00"));
    }

    #[test]
    fn test_report_province_breakdown() {
        let ledger = LedgerBuilder::new()
            .with(|a| a.with_id(1).in_province("Quebec").with_allocation(dec!(200)).with_usage(dec!(50)))
            .with(|a| a.with_id(2).in_province("Alberta").with_allocation(dec!(100)))
            .with(|a| a.with_id(3).in_province("Alberta").with_allocation(dec!(100)))
            .with_standard_bill(2, dec!(40))
            .build();

        let report = ReportBuilder::new(&ledger, Timezone::default())
            .build(TemporalFixtures::first_overdue_day());

        let names: Vec<_> = report.provinces.iter().map(|p| p.stats.province.as_str()).collect();
        assert_eq!(names, vec!["Alberta", "Quebec"]);
        assert_eq!(report.provinces[0].overdue_percentage, dec!(50));
        assert_eq!(report.provinces[1].usage_percentage, dec!(25));
        assert_eq!(report.overall.overdue_count, 1);
        assert_eq!(report.overall.overdue_percentage, dec!(33.33));
        assert_eq!(report.overall.total_unpaid, Money::new(dec!(40)));
    }

    #[test]
    fn test_report_period_label_uses_timezone() {
        let ledger = Ledger::new(RateTable::standard());
        let toronto: Timezone = "America/Toronto".parse().unwrap();
        let at = chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 11, 1, 2, 0, 0).unwrap();

        let report = ReportBuilder::new(&ledger, toronto).build(at);

        assert_eq!(report.period_label, "October 2026");
        assert!(report.to_string().starts_with("Energy Provider Monthly Report - October 2026\n"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let ledger = LedgerBuilder::new()
            .with(|a| a.with_id(1).with_usage(dec!(10)))
            .build();
        let report = ReportBuilder::new(&ledger, Timezone::default()).build(TemporalFixtures::report_date());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overall"]["customer_count"], 1);
        assert_eq!(json["provinces"][0]["province"], "Ontario");
        assert_eq!(json["period_label"], "March 2024");
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_usage_stays_within_allocation(
            allocation in allocation_strategy(),
            amounts in usage_sequence_strategy(20),
        ) {
            let mut account = AccountBuilder::new().with_allocation(allocation).build();

            for amount in amounts {
                let before = account.usage();
                match account.record_usage(amount) {
                    Ok(()) => prop_assert_eq!(account.usage(), before + amount),
                    Err(_) => prop_assert_eq!(account.usage(), before),
                }
                assert_usage_within_allocation(&account);
            }
        }

        #[test]
        fn prop_overdue_iff_older_than_thirty_days(age in bill_age_days_strategy()) {
            let mut account = AccountBuilder::new().with_usage(dec!(1)).build();
            let issued = TemporalFixtures::billing_date();
            account.issue_bill(Rate::new(dec!(1)), issued);

            let now = issued + Duration::days(age);
            prop_assert_eq!(account.has_overdue_bills(now), age > 30);
        }

        #[test]
        fn prop_short_payment_never_settles(cents in 1i64..10_000i64) {
            let mut account = AccountBuilder::new().with_usage(dec!(100)).build();
            account.issue_bill(Rate::new(dec!(1)), TemporalFixtures::billing_date());

            let short = Money::new(dec!(100)) - Money::from_cents(cents);
            let settled = account.apply_payment(0, short, TemporalFixtures::report_date()).unwrap();

            prop_assert!(!settled);
            prop_assert!(!account.bills()[0].paid);
            assert_total_owed_consistent(&account);
        }

        #[test]
        fn prop_bill_is_rate_times_usage(rate in rate_strategy(), usage in usage_strategy()) {
            let mut account = AccountBuilder::new().with_allocation(dec!(500)).with_usage(usage).build();

            let amount = account.issue_bill(rate, TemporalFixtures::billing_date()).amount;

            prop_assert_eq!(amount, Money::new(rate.as_decimal() * usage));
            prop_assert_eq!(account.usage(), Decimal::ZERO);
        }

        #[test]
        fn prop_full_or_over_payment_settles(extra in money_strategy()) {
            let mut account = AccountBuilder::new().with_usage(dec!(100)).build();
            account.issue_bill(Rate::new(dec!(1)), TemporalFixtures::billing_date());

            let payment = Money::new(dec!(100)) + extra;
            let settled = account.apply_payment(0, payment, TemporalFixtures::report_date()).unwrap();

            prop_assert!(settled);
            prop_assert!(account.total_owed().is_zero());
        }

        #[test]
        fn prop_statistics_consistent(
            accounts in prop::collection::vec(
                (energy_category_strategy(), province_strategy(), 0u32..100u32),
                0..15,
            ),
            age in bill_age_days_strategy(),
        ) {
            let mut builder = LedgerBuilder::new().with_rates(RateFixtures::standard());
            for (i, (category, province, usage)) in accounts.iter().enumerate() {
                let id = 1001 + i as u32;
                builder = builder.with(|a| {
                    a.with_id(id)
                        .in_province(*province)
                        .with_category(*category)
                        .with_allocation(dec!(100))
                        .with_usage(Decimal::from(*usage))
                });
            }
            let mut ledger = builder.build();
            let issued = TemporalFixtures::billing_date();
            ledger.run_billing_cycle(issued);

            let now = issued + Duration::days(age);
            assert_statistics_consistent(&ledger, now);

            let report = ReportBuilder::new(&ledger, Timezone::default()).build(now);
            prop_assert_eq!(report.overall.customer_count, ledger.len());
            prop_assert!(report.overall.overdue_percentage <= dec!(100));
        }
    }
}
