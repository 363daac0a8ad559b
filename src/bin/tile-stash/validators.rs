use tile_stash::{MAX_LATITUDE, MAX_ZOOM};

pub fn parse_latitude(v: &str) -> Result<f64, String> {
    let val = v.parse::<f64>().map_err(|_| "must be numeric".to_owned())?;

    if val < -MAX_LATITUDE {
        return Err(format!("must be >= -{}°", MAX_LATITUDE));
    } else if val > MAX_LATITUDE {
        return Err(format!("must be <= {}°", MAX_LATITUDE));
    }

    Ok(val)
}

pub fn parse_longitude(v: &str) -> Result<f64, String> {
    let val = v.parse::<f64>().map_err(|_| "must be numeric".to_owned())?;

    if val < -180f64 {
        return Err("must be >= -180°".to_owned());
    } else if val > 180f64 {
        return Err("must be <= 180°".to_owned());
    }

    Ok(val)
}

pub fn parse_zoom(v: &str) -> Result<u8, String> {
    let val = v.parse::<u8>().map_err(|_| "must be numeric".to_owned())?;

    if val > MAX_ZOOM {
        return Err(format!("must be <= {}", MAX_ZOOM));
    }

    Ok(val)
}
