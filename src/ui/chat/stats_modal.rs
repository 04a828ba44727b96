//! Statistics modal component.

use leptos::prelude::*;

use crate::api::SessionStats;
use crate::ui::components::{
    Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, XIcon,
};
use crate::ui::controller::WidgetContext;

/// Overlay showing the last fetched statistics; closing it discards them.
#[component]
pub fn StatsModal(stats: SessionStats) -> impl IntoView {
    let ctx = expect_context::<WidgetContext>();
    let close = Callback::new(move |_| ctx.close_stats());

    view! {
        <div class="modal-overlay" role="dialog" aria-modal="true" aria-label="Chat Statistics">
            <Card class="stats-modal">
                <CardHeader>
                    <h3>"Chat Statistics"</h3>
                    <Button variant=ButtonVariant::Ghost size=ButtonSize::Icon label="Close" on_click=close>
                        <XIcon />
                    </Button>
                </CardHeader>
                <CardContent class="stats-content">
                    <div class="stat-item">
                        <span>"Total Messages"</span>
                        <Badge>{stats.total_messages}</Badge>
                    </div>
                    <div class="stat-item">
                        <span>"Your Messages"</span>
                        <Badge variant=BadgeVariant::User>{stats.user_messages}</Badge>
                    </div>
                    <div class="stat-item">
                        <span>"Bot Messages"</span>
                        <Badge variant=BadgeVariant::Bot>{stats.bot_messages}</Badge>
                    </div>
                </CardContent>
            </Card>
        </div>
    }
}
