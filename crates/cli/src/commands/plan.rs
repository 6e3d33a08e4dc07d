use std::path::Path;

use mlo::TabPlan;
use serde::Serialize;

use crate::context::CommandContext;
use crate::error::Result;
use crate::input::read_urls;
use crate::output::{ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanData {
	requested: usize,
	count: usize,
	span_ms: u64,
	tabs: Vec<PlannedTab>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlannedTab {
	url: String,
	offset_ms: u64,
	active: bool,
}

pub fn execute(urls: Vec<String>, file: Option<&Path>, ctx: &CommandContext) -> Result<()> {
	let urls = read_urls(urls, file)?;
	let plan = TabPlan::from_urls(&urls, &ctx.config);

	let data = PlanData {
		requested: urls.len(),
		count: plan.len(),
		span_ms: plan.span().as_millis() as u64,
		tabs: plan
			.tabs()
			.iter()
			.map(|scheduled| PlannedTab {
				url: scheduled.tab.url.clone(),
				offset_ms: scheduled.offset.as_millis() as u64,
				active: scheduled.tab.active,
			})
			.collect(),
	};

	print_result(&ResultBuilder::new("plan").data(data).build(), ctx.format);
	Ok(())
}
