/// Options to control how unitag writes a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) id3v23: bool,
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	id3v23: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl WriteOptions {
	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self { id3v23: false }
	}

	/// Whether to downgrade ID3v2 frames to revision 2.3 before saving
	///
	/// Only honored for containers carrying ID3 frames; other families
	/// ignore it. Multi-valued frames flagged for the legacy revision are
	/// joined with `/` on write.
	///
	/// # Examples
	///
	/// ```rust
	/// use unitag::config::WriteOptions;
	///
	/// // I need tags old Windows software can read!
	/// let write_options = WriteOptions::new().id3v23(true);
	/// ```
	pub fn id3v23(&mut self, id3v23: bool) -> Self {
		self.id3v23 = id3v23;
		*self
	}
}
