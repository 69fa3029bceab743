use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use exhibitor_catalog::Crosswalk;
use exhibitor_import::{
    AltTextOptions, Collection, Format, attach_alt_text, attach_images, fix_titles, make_slugs,
    make_summaries,
};

use super::{CatalogContext, delimiter, open_destination, report_written, warn_incomplete};
use crate::cli_types::MediaArgs;
use crate::error::CliError;

/// Run the post-processing passes over converted JSON.
pub(crate) fn run_prepare(
    ctx: &CatalogContext,
    source: &Path,
    destination: &Path,
    blurb: Option<String>,
    media: MediaArgs,
) -> Result<(), CliError> {
    let exhibition = ctx.load()?;
    let fixups = &exhibition.fixups;

    let mut collection = Collection::new(Crosswalk::identity()).with_delimiter(delimiter(&exhibition));
    collection.load(source, Format::Json, false)?;
    log::info!(
        "Loaded {} records from {}",
        collection.len().if_supports_color(Stdout, |t| t.bold()),
        source.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let stats = fix_titles(&mut collection, &fixups.titles);
    if stats.drifted > 0 {
        log::warn!(
            "  {} {} title fix-ups skipped because the source title changed",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            stats.drifted,
        );
    }
    log::info!("Fixed {} titles", stats.applied);

    let slugs = make_slugs(&mut collection, &fixups.slugs)?;
    log::info!("Assigned {} slugs", slugs);

    let blurb = blurb.or_else(|| exhibition.info.blurb.clone());
    let summaries = make_summaries(&mut collection, fixups, blurb.as_deref())?;
    log::info!("Wrote {} summaries", summaries);

    attach_media(&mut collection, &media)?;
    warn_incomplete(&collection);

    let mut out = open_destination(destination)?;
    collection.dump(&mut out, Format::Json)?;
    out.flush()?;
    report_written(destination);
    Ok(())
}

fn attach_media(collection: &mut Collection, media: &MediaArgs) -> Result<(), CliError> {
    let Some(images) = &media.images else {
        log::warn!("No images will be processed. Use --images to specify a directory.");
        return Ok(());
    };

    attach_images(collection, images, media.strict)?;

    match &media.alt {
        Some(alt) => {
            let options = AltTextOptions {
                fail_on_image_missing: media.strict,
                fail_on_mismatch: media.strict,
            };
            attach_alt_text(collection, alt, options)?;
        }
        None => log::warn!(
            "No alt text CSV was supplied with --alt. The images in {} will be processed, \
             but the result will NOT be compliant with accessibility laws and policies.",
            std::path::absolute(images)
                .unwrap_or_else(|_| images.clone())
                .display(),
        ),
    }
    Ok(())
}
