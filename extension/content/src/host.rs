use chrono::{NaiveDate, NaiveDateTime};
use mlo::{Error, ExportFile, Message, PageHost};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url, Window};

use crate::chrome;

/// How long the object URL behind a download stays alive.
const REVOKE_DELAY_MS: i32 = 2_000;

/// Browser-side [`PageHost`]: native dialogs, runtime messaging, downloads.
pub struct WebHost {
	window: Window,
}

impl WebHost {
	pub fn new() -> Option<Self> {
		web_sys::window().map(|window| Self { window })
	}

	fn download(&self, file: &ExportFile) -> Result<(), JsValue> {
		let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(file.bytes.as_slice()));
		let options = BlobPropertyBag::new();
		options.set_type(file.media_type);
		let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

		let url = Url::create_object_url_with_blob(&blob)?;
		let clicked = self.click_link(&url, &file.filename);
		self.revoke_later(url);
		clicked
	}

	fn click_link(&self, url: &str, filename: &str) -> Result<(), JsValue> {
		let document = self
			.window
			.document()
			.ok_or_else(|| JsValue::from_str("window has no document"))?;
		let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;
		let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
		anchor.set_href(url);
		anchor.set_download(filename);

		body.append_child(&anchor)?;
		anchor.click();
		anchor.remove();
		Ok(())
	}

	fn revoke_later(&self, url: String) {
		let pending = url.clone();
		let revoke = Closure::once_into_js(move || {
			let _ = Url::revoke_object_url(&pending);
		});
		if self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(revoke.unchecked_ref(), REVOKE_DELAY_MS)
			.is_err()
		{
			let _ = Url::revoke_object_url(&url);
		}
	}
}

impl PageHost for WebHost {
	fn confirm(&mut self, message: &str) -> bool {
		self.window.confirm_with_message(message).unwrap_or(false)
	}

	fn send(&mut self, message: Message) {
		chrome::send_message(&message);
	}

	fn save(&mut self, file: ExportFile) -> mlo::Result<()> {
		self.download(&file)
			.map_err(|err| Error::save(&file.filename, err.as_string().unwrap_or_else(|| format!("{err:?}"))))
	}

	fn now(&self) -> NaiveDateTime {
		let date = js_sys::Date::new_0();
		NaiveDate::from_ymd_opt(date.get_full_year() as i32, date.get_month() + 1, date.get_date())
			.and_then(|day| day.and_hms_opt(date.get_hours(), date.get_minutes(), date.get_seconds()))
			.unwrap_or_default()
	}
}
