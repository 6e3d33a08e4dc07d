use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use mlo::export::encode_with_prefix;
use mlo::{LinkRecord, SelectionStore};
use serde::Serialize;
use tracing::info;

use crate::context::CommandContext;
use crate::error::Result;
use crate::output::{Artifact, ArtifactType, ResultBuilder, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportData {
	count: usize,
	#[serde(skip_serializing_if = "Option::is_none")]
	filename: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	path: Option<PathBuf>,
}

pub fn execute(input: Option<&Path>, out_dir: &Path, ctx: &CommandContext) -> Result<()> {
	let json = match input {
		Some(path) => fs::read_to_string(path)?,
		None => {
			let mut buf = String::new();
			io::stdin().read_to_string(&mut buf)?;
			buf
		}
	};
	let records: Vec<LinkRecord> = serde_json::from_str(&json)?;
	let store: SelectionStore = records.into_iter().collect();

	let now = chrono::Local::now().naive_local();
	let Some(file) = encode_with_prefix(&store, now, &ctx.config.export_prefix) else {
		info!(target = "mlo", "nothing selected, no file written");
		let data = ExportData {
			count: 0,
			filename: None,
			path: None,
		};
		print_result(&ResultBuilder::new("export").data(data).build(), ctx.format);
		return Ok(());
	};

	fs::create_dir_all(out_dir)?;
	let path = out_dir.join(&file.filename);
	fs::write(&path, &file.bytes)?;
	info!(target = "mlo", path = %path.display(), count = store.len(), "exported links");

	let artifact = Artifact {
		artifact_type: ArtifactType::Csv,
		path: path.clone(),
		size_bytes: Some(file.bytes.len() as u64),
	};
	let data = ExportData {
		count: store.len(),
		filename: Some(file.filename),
		path: Some(path),
	};
	print_result(&ResultBuilder::new("export").data(data).artifact(artifact).build(), ctx.format);
	Ok(())
}
