use chrono::NaiveDate;
use leptos::prelude::*;

use crate::types::{demo_accounts, demo_team_leaders, Account, Selection, TeamLeader};

/// App-wide selection and reference data shared by every page. Accounts
/// and team leaders are seeded with demo data so the shell renders before
/// the first fetch lands; pages refresh them from the backend.
#[derive(Clone)]
pub struct AppState {
    pub accounts: ReadSignal<Vec<Account>>,
    pub set_accounts: WriteSignal<Vec<Account>>,
    pub team_leaders: ReadSignal<Vec<TeamLeader>>,
    pub set_team_leaders: WriteSignal<Vec<TeamLeader>>,
    pub selected_account: ReadSignal<Option<String>>,
    pub set_selected_account: WriteSignal<Option<String>>,
    pub report_date: ReadSignal<NaiveDate>,
    pub set_report_date: WriteSignal<NaiveDate>,
    pub leader_filter: ReadSignal<Option<String>>,
    pub set_leader_filter: WriteSignal<Option<String>>,
}

impl AppState {
    /// The active grid selection, once an account is chosen.
    pub fn selection(&self) -> Option<Selection> {
        self.selected_account.get().map(|account_id| Selection {
            account_id,
            date: self.report_date.get(),
            team_leader_id: self.leader_filter.get(),
        })
    }
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn provide_app_state() {
    let (accounts, set_accounts) = signal(demo_accounts());
    let (team_leaders, set_team_leaders) = signal(demo_team_leaders());
    let (selected_account, set_selected_account) = signal(None::<String>);
    let (report_date, set_report_date) = signal(today());
    let (leader_filter, set_leader_filter) = signal(None::<String>);

    provide_context(AppState {
        accounts,
        set_accounts,
        team_leaders,
        set_team_leaders,
        selected_account,
        set_selected_account,
        report_date,
        set_report_date,
        leader_filter,
        set_leader_filter,
    });
}

pub fn use_app_state() -> AppState {
    expect_context::<AppState>()
}
